//! Event descriptors produced by the generators and consumed by the
//! orchestrators.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::to_date_only_string;

/// Start or end of an event: a civil date for all-day events, or a
/// date-time carrying its own UTC offset. Never a floating local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl EventTime {
    /// Civil date of this time, truncating date-times in their own offset.
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date_naive(),
        }
    }

    pub fn to_date_only_string(&self) -> String {
        to_date_only_string(self.date())
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%:z")),
        }
    }
}

/// One calendar event before it is submitted to a calendar store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub title: String,
    pub start: EventTime,
    /// Equal to `start` for all-day events.
    pub end: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventDescriptor {
    pub fn all_day(title: impl Into<String>, date: NaiveDate, description: Option<String>) -> Self {
        EventDescriptor {
            title: title.into(),
            start: EventTime::Date(date),
            end: EventTime::Date(date),
            description,
        }
    }

    pub fn timed(
        title: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        description: Option<String>,
    ) -> Self {
        EventDescriptor {
            title: title.into(),
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(end),
            description,
        }
    }
}

/// An event as listed back from a calendar store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub title: String,
    pub start: EventTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_truncates_in_own_offset() {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2024-01-01T23:30+09:00 is still January 1st locally even though it's
        // already past midnight in some offsets and before it in UTC
        let dt = jst.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let time = EventTime::DateTime(dt);
        assert_eq!(time.to_date_only_string(), "2024-01-01");
        assert_eq!(time.to_string(), "2024-01-01T23:30:00+09:00");
    }

    #[test]
    fn all_day_end_equals_start() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let event = EventDescriptor::all_day("初七日", date, None);
        assert_eq!(event.start, event.end);
        assert!(event.start.is_all_day());
    }
}
