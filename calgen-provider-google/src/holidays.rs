use async_trait::async_trait;
use calgen_core::date::{add_days, tokyo_offset};
use calgen_core::holiday::{HolidaySet, HolidaySource};
use calgen_core::identity::Credential;
use calgen_core::store::CalendarStore;
use calgen_core::{CalGenError, CalGenResult};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::debug;

use crate::store::GoogleCalendarStore;

/// Holidays read from a public Google holiday calendar, such as
/// `ja.japanese#holiday@group.v.calendar.google.com`.
pub struct GoogleHolidaySource {
    calendar_id: String,
}

impl GoogleHolidaySource {
    pub fn new(calendar_id: impl Into<String>) -> Self {
        GoogleHolidaySource {
            calendar_id: calendar_id.into(),
        }
    }
}

#[async_trait]
impl HolidaySource for GoogleHolidaySource {
    async fn list_holiday_dates(
        &self,
        credential: &Credential,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalGenResult<HolidaySet> {
        credential.ensure_valid(Utc::now())?;

        let out_of_range = || {
            CalGenError::Validation(format!("holiday range {}..{} is out of range", from, to))
        };

        // Midnight Tokyo time on `from` up to midnight after `to`
        let time_min = tokyo_offset()
            .from_local_datetime(&from.and_time(NaiveTime::MIN))
            .single()
            .ok_or_else(out_of_range)?;
        let after = add_days(to, 1).ok_or_else(out_of_range)?;
        let time_max = tokyo_offset()
            .from_local_datetime(&after.and_time(NaiveTime::MIN))
            .single()
            .ok_or_else(out_of_range)?;

        let events = GoogleCalendarStore::new(credential)
            .list_events(
                &self.calendar_id,
                time_min.with_timezone(&Utc),
                time_max.with_timezone(&Utc),
            )
            .await?;

        let holidays: HolidaySet = HolidaySet::from_event_times(events.iter().map(|e| &e.start))
            .iter()
            .copied()
            .filter(|d| *d >= from && *d <= to)
            .collect();

        debug!(calendar_id = %self.calendar_id, count = holidays.len(), "fetched holidays");

        Ok(holidays)
    }
}
