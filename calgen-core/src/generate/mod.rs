//! Sequence generators.
//!
//! Each generator is a pure function from a parameter set to an ordered
//! list of [`EventDescriptor`](crate::event::EventDescriptor)s. None of them
//! read the clock, so identical parameters always yield identical output.

pub mod anniversary;
pub mod biweekly;
pub mod memorial;

pub use anniversary::{AnniversaryParams, Interval};
pub use biweekly::{BiweeklyParams, TimeRange, parse_weekday};
pub use memorial::MemorialParams;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CalGenError, CalGenResult};

fn out_of_range(date: NaiveDate, what: &str) -> CalGenError {
    CalGenError::Validation(format!("{} from {} is out of range", what, date))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> CalGenResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        CalGenError::Validation(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

/// Parse `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`, or a bare date (midnight).
pub fn parse_date_time(s: &str) -> CalGenResult<NaiveDateTime> {
    let s = s.trim();

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    parse_date(s)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| {
            CalGenError::Validation(format!(
                "Invalid date/time '{}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
                s
            ))
        })
}

fn non_empty(template: Option<&str>) -> Option<&str> {
    template.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn parse_date_time_accepts_time_of_day() {
        let dt = parse_date_time("2024-01-10T09:30").unwrap();
        assert_eq!(dt.to_string(), "2024-01-10 09:30:00");
        assert_eq!(parse_date_time("2024-01-10 09:30").unwrap(), dt);
    }

    #[test]
    fn parse_date_time_defaults_to_midnight() {
        let dt = parse_date_time("2024-01-10").unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
        assert!(parse_date_time("10 Jan").is_err());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(parse_date("2024/02/29"), Err(CalGenError::Validation(_))));
        assert!(matches!(parse_date("2023-02-29"), Err(CalGenError::Validation(_))));
    }
}
