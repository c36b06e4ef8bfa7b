//! Civil-calendar arithmetic and formatting shared by the generators.
//!
//! Month and year arithmetic normalises overflow instead of clamping: when
//! the source day does not exist in the target month, the surplus days roll
//! into the next month (Jan 31 + 1 month = Mar 2 or Mar 3, Feb 29 + 1 year
//! = Mar 1). Every function returns a new value.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Weekday};

const JST_OFFSET_SECS: i32 = 9 * 3600;

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date.year().checked_mul(12)? + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    add_days(first, i64::from(date.day()) - 1)
}

pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

/// First date on or after `date` that falls on `weekday`.
pub fn next_occurrence_of_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let from = date.weekday().num_days_from_sunday();
    let to = weekday.num_days_from_sunday();
    let ahead = (to + 7 - from) % 7;
    date + Duration::days(i64::from(ahead))
}

/// Weekday for an index where 0 = Sunday and 6 = Saturday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Japan Standard Time, +09:00. Fixed for every date: historical DST and
/// local mean time are not applied.
pub fn tokyo_offset() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("+09:00 is a valid offset")
}

/// Build a date-time pinned to an explicit offset, independent of the
/// process time zone.
pub fn zoned(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    offset.from_local_datetime(&date.and_time(time)).single()
}

/// `YYYY-MM-DD`
pub fn to_date_only_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DDTHH:MM:SS+HH:MM`
pub fn to_zoned_date_time_string(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> String {
    format!(
        "{}T{}{}",
        date.format("%Y-%m-%d"),
        time.format("%H:%M:%S"),
        offset
    )
}
