//! Meetings held every other week on a fixed weekday, optionally skipping
//! public holidays.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use regex::Regex;
use tracing::debug;

use super::out_of_range;
use crate::date::{next_occurrence_of_weekday, tokyo_offset, weekday_from_index, zoned};
use crate::error::{CalGenError, CalGenResult};
use crate::event::EventDescriptor;
use crate::holiday::{HolidaySource, filter_holidays};
use crate::identity::Credential;

const INTERVAL_DAYS: i64 = 14;

static TIME_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}):(\d{2})-(\d{2}):(\d{2})$").expect("valid regex"));

/// Start and end time of day, parsed from `HH:MM-HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FromStr for TimeRange {
    type Err = CalGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            CalGenError::Validation(format!("Invalid time range '{}'. Expected HH:MM-HH:MM", s))
        };

        let caps = TIME_RANGE_RE.captures(s).ok_or_else(invalid)?;
        let field = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());

        let start = NaiveTime::from_hms_opt(field(1)?, field(2)?, 0).ok_or_else(invalid)?;
        let end = NaiveTime::from_hms_opt(field(3)?, field(4)?, 0).ok_or_else(invalid)?;

        if end <= start {
            return Err(CalGenError::Validation(format!(
                "Invalid time range '{}': end must be after start",
                s
            )));
        }

        Ok(TimeRange { start, end })
    }
}

/// Parse a weekday given as 0-6 (0 = Sunday), an English name or
/// abbreviation, or a Japanese day token (月, 月曜, 月曜日). Empty input
/// means Monday.
pub fn parse_weekday(s: &str) -> CalGenResult<Weekday> {
    let token = s.trim().to_lowercase();

    if token.is_empty() {
        return Ok(Weekday::Mon);
    }

    if let Ok(index) = token.parse::<u8>() {
        return weekday_from_index(index).ok_or_else(|| {
            CalGenError::Validation(format!("Weekday index {} is out of range 0-6", index))
        });
    }

    let weekday = match (token.as_str(), japanese_stem(&token)) {
        ("sun" | "sunday", _) | (_, "日") => Weekday::Sun,
        ("mon" | "monday", _) | (_, "月") => Weekday::Mon,
        ("tue" | "tues" | "tuesday", _) | (_, "火") => Weekday::Tue,
        ("wed" | "wednesday", _) | (_, "水") => Weekday::Wed,
        ("thu" | "thur" | "thurs" | "thursday", _) | (_, "木") => Weekday::Thu,
        ("fri" | "friday", _) | (_, "金") => Weekday::Fri,
        ("sat" | "saturday", _) | (_, "土") => Weekday::Sat,
        _ => {
            return Err(CalGenError::Validation(format!("Unknown weekday '{}'", s)));
        }
    };

    Ok(weekday)
}

/// `月曜日` and `月曜` both reduce to `月`.
fn japanese_stem(token: &str) -> &str {
    token
        .strip_suffix("曜日")
        .or_else(|| token.strip_suffix('曜'))
        .unwrap_or(token)
}

#[derive(Debug, Clone)]
pub struct BiweeklyParams {
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub weekday: Weekday,
    pub time_range: TimeRange,
    pub title: String,
    pub description: Option<String>,
    pub skip_holidays: bool,
}

/// Every occurrence in range, without consulting any holiday source.
pub fn generate(params: &BiweeklyParams) -> CalGenResult<Vec<EventDescriptor>> {
    if params.title.trim().is_empty() {
        return Err(CalGenError::validation("title is required"));
    }
    if params.end_date < params.start_date {
        return Err(CalGenError::Validation(format!(
            "end date {} is before start date {}",
            params.end_date, params.start_date
        )));
    }

    let mut events = Vec::new();
    let mut date = next_occurrence_of_weekday(params.start_date, params.weekday);

    let offset = tokyo_offset();

    while date <= params.end_date {
        let start = zoned(date, params.time_range.start, offset)
            .ok_or_else(|| out_of_range(date, "meeting"))?;
        let end = zoned(date, params.time_range.end, offset)
            .ok_or_else(|| out_of_range(date, "meeting"))?;

        events.push(EventDescriptor::timed(
            params.title.clone(),
            start,
            end,
            params.description.clone(),
        ));

        date = date
            .checked_add_signed(Duration::days(INTERVAL_DAYS))
            .ok_or_else(|| out_of_range(date, "meeting"))?;
    }

    debug!(
        weekday = %params.weekday,
        count = events.len(),
        "generated biweekly sequence"
    );

    Ok(events)
}

/// Generate occurrences and, when `skip_holidays` is set, drop those that
/// land on a holiday reported by `source`. A failing source fails the
/// whole generation.
pub async fn generate_filtered<H>(
    params: &BiweeklyParams,
    source: &H,
    credential: &Credential,
) -> CalGenResult<Vec<EventDescriptor>>
where
    H: HolidaySource + ?Sized,
{
    let events = generate(params)?;

    if !params.skip_holidays {
        return Ok(events);
    }

    let holidays = source
        .list_holiday_dates(credential, params.start_date, params.end_date)
        .await?;

    Ok(filter_holidays(events, &holidays))
}
