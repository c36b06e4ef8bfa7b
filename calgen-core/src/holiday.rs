//! Public-holiday lookup and filtering for generated sequences.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::error::CalGenResult;
use crate::event::{EventDescriptor, EventTime};
use crate::identity::Credential;

/// Dates that are public holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holiday calendars normally use all-day markers; a zoned date-time is
    /// truncated to its civil date.
    pub fn from_event_times<'a>(times: impl IntoIterator<Item = &'a EventTime>) -> Self {
        HolidaySet(times.into_iter().map(EventTime::date).collect())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        HolidaySet(iter.into_iter().collect())
    }
}

/// Source of public-holiday dates.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Holidays within `[from, to]`, both inclusive.
    async fn list_holiday_dates(
        &self,
        credential: &Credential,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalGenResult<HolidaySet>;
}

/// Drop every event whose start date is a holiday. Skipped occurrences are
/// not moved to another day.
pub fn filter_holidays(events: Vec<EventDescriptor>, holidays: &HolidaySet) -> Vec<EventDescriptor> {
    let before = events.len();

    let kept: Vec<EventDescriptor> = events
        .into_iter()
        .filter(|e| !holidays.contains(e.start.date()))
        .collect();

    debug!(skipped = before - kept.len(), "filtered holidays");

    kept
}
