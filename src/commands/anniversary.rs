use anyhow::Result;
use calgen_core::generate::anniversary::{self, AnniversaryParams, Interval};
use calgen_core::generate::parse_date_time;

use super::{Context, preview_or_register};
use crate::OutputArgs;

pub async fn run(
    ctx: &Context,
    start: &str,
    interval: &str,
    count: u32,
    title: Option<String>,
    description: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    let params = AnniversaryParams {
        start: parse_date_time(start)?,
        interval: interval.parse::<Interval>()?,
        count,
        title_template: title,
        description,
    };

    let events = anniversary::generate(&params)?;
    preview_or_register(ctx, events, output).await
}
