//! Yearly and monthly anniversaries counted from a start date.

use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{non_empty, out_of_range};
use crate::date::{add_months, add_years, tokyo_offset, zoned};
use crate::error::{CalGenError, CalGenResult};
use crate::event::EventDescriptor;

/// Replaced by the running index (yearly) or the elapsed label (monthly).
const PLACEHOLDER: &str = "#";

/// Replaced as a whole by the elapsed label, so the year part can be dropped
/// for anniversaries under a year.
const COMBINED_TOKEN: &str = "#年#ヶ月";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Yearly,
    Monthly,
}

impl FromStr for Interval {
    type Err = CalGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yearly" | "year" | "y" => Ok(Interval::Yearly),
            "monthly" | "month" | "m" => Ok(Interval::Monthly),
            other => Err(CalGenError::Validation(format!(
                "Unknown interval '{}'. Expected yearly or monthly",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnniversaryParams {
    /// Date and time of day of the first occurrence, in Tokyo local time.
    pub start: NaiveDateTime,
    pub interval: Interval,
    pub count: u32,
    pub title_template: Option<String>,
    pub description: Option<String>,
}

pub fn generate(params: &AnniversaryParams) -> CalGenResult<Vec<EventDescriptor>> {
    if params.count == 0 {
        return Err(CalGenError::validation("count must be at least 1"));
    }

    let start_date = params.start.date();
    let time = params.start.time();
    let template = non_empty(params.title_template.as_deref());

    let mut events = Vec::with_capacity(params.count as usize);

    for index in 1..=params.count {
        let step = i32::try_from(index - 1)
            .map_err(|_| CalGenError::validation("count is too large"))?;

        let date = match params.interval {
            Interval::Yearly => add_years(start_date, step),
            Interval::Monthly => add_months(start_date, step),
        }
        .ok_or_else(|| out_of_range(start_date, "anniversary"))?;

        let start = zoned(date, time, tokyo_offset())
            .ok_or_else(|| out_of_range(start_date, "anniversary"))?;

        let title = match params.interval {
            Interval::Yearly => yearly_title(template, index, params.count),
            Interval::Monthly => monthly_title(template, index),
        };

        events.push(EventDescriptor::timed(
            title,
            start,
            start + Duration::hours(1),
            params.description.clone(),
        ));
    }

    debug!(
        interval = ?params.interval,
        count = events.len(),
        "generated anniversary sequence"
    );

    Ok(events)
}

/// Without a template every occurrence is labelled with the total count.
fn yearly_title(template: Option<&str>, index: u32, count: u32) -> String {
    match template {
        Some(t) => t.replace(PLACEHOLDER, &index.to_string()),
        None => format!("{}回目の記念日", count),
    }
}

fn monthly_title(template: Option<&str>, index: u32) -> String {
    let years = (index - 1) / 12;
    let months = (index - 1) % 12 + 1;

    match template {
        Some(t) => {
            let label = elapsed_label(years, months);
            t.replace(COMBINED_TOKEN, &label).replace(PLACEHOLDER, &label)
        }
        None => format!("{}年{}ヶ月の記念日", years, months),
    }
}

fn elapsed_label(years: u32, months: u32) -> String {
    if years == 0 {
        format!("{}ヶ月", months)
    } else {
        format!("{}年{}ヶ月", years, months)
    }
}
