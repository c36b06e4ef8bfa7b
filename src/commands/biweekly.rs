use anyhow::Result;
use calgen_core::generate::biweekly::{self, BiweeklyParams, TimeRange};
use calgen_core::generate::{parse_date, parse_weekday};
use calgen_provider_google::GoogleHolidaySource;

use super::{Context, preview_or_register};
use crate::OutputArgs;

/// Raw command-line values, parsed in `run`.
pub struct Params {
    pub start: String,
    pub end: String,
    pub weekday: String,
    pub time: String,
    pub title: String,
    pub description: Option<String>,
    pub skip_holidays: bool,
}

pub async fn run(ctx: &Context, params: Params, output: &OutputArgs) -> Result<()> {
    let params = BiweeklyParams {
        start_date: parse_date(&params.start)?,
        end_date: parse_date(&params.end)?,
        weekday: parse_weekday(&params.weekday)?,
        time_range: params.time.parse::<TimeRange>()?,
        title: params.title,
        description: params.description,
        skip_holidays: params.skip_holidays,
    };

    let events = if params.skip_holidays {
        let credential = ctx.credential()?;
        let holidays = GoogleHolidaySource::new(ctx.config.holiday_calendar_id.clone());
        biweekly::generate_filtered(&params, &holidays, &credential).await?
    } else {
        biweekly::generate(&params)?
    };

    preview_or_register(ctx, events, output).await
}
