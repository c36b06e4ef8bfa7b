use anyhow::Result;
use calgen_core::store::CalendarStore;
use calgen_provider_google::GoogleCalendarStore;
use owo_colors::OwoColorize;

use super::Context;

pub async fn run(ctx: &Context, name: &str) -> Result<()> {
    let credential = ctx.credential()?;
    let store = GoogleCalendarStore::new(&credential);

    let id = store.create_calendar(name).await?;

    println!("{} Created calendar {}", "✓".green(), name.bold());
    println!("   id: {}", id);
    println!(
        "\n{}",
        format!("Use it with --calendar {id}, or set default_calendar in your config.").dimmed()
    );

    Ok(())
}
