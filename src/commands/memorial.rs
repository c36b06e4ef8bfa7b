use anyhow::Result;
use calgen_core::generate::memorial::{self, MemorialParams};
use calgen_core::generate::parse_date;

use super::{Context, preview_or_register};
use crate::OutputArgs;

pub async fn run(
    ctx: &Context,
    base_date: &str,
    until_years: u32,
    include_base_day: bool,
    title: String,
    description: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    let params = MemorialParams {
        until_years,
        include_base_day,
        title_template: title,
        description,
        ..MemorialParams::new(parse_date(base_date)?)
    };

    let events = memorial::generate(&params)?;
    preview_or_register(ctx, events, output).await
}
