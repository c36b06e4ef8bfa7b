use anyhow::Result;
use calgen_core::RemoteEvent;
use calgen_core::delete::Deleter;
use calgen_core::progress::Progress;
use calgen_provider_google::GoogleCalendarStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;

use super::{Context, cancel_on_ctrl_c, exit_status};
use crate::render::{self, Render};

pub async fn run(ctx: &Context, calendar: Option<String>, yes: bool) -> Result<()> {
    let calendar_id = ctx.calendar_id(calendar)?;
    let credential = ctx.credential()?;
    let store = GoogleCalendarStore::new(&credential);

    let events = Deleter::new(&store, ctx.config.pacing())
        .list_all(&calendar_id)
        .await?;

    if events.is_empty() {
        println!("{}", format!("No events in {calendar_id}").dimmed());
        return Ok(());
    }

    // Confirm unless --yes
    if !yes {
        println!(
            "{} {} in {}",
            events.len(),
            if events.len() == 1 { "event" } else { "events" },
            calendar_id.bold()
        );
        let confirmed = Confirm::new()
            .with_prompt("Delete all of them? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Progress<RemoteEvent>>();
    let printer = tokio::spawn(async move {
        while let Some(p) = rx.recv().await {
            let mark = if p.succeeded {
                "✓".green().to_string()
            } else {
                "✗".red().to_string()
            };
            eprintln!(
                "{} [{}/{}] {}",
                mark,
                p.completed_count,
                p.total_count,
                p.most_recent.render()
            );
        }
    });

    let result = Deleter::new(&store, ctx.config.pacing())
        .with_progress(tx)
        .with_cancellation(cancel_on_ctrl_c())
        .delete_events(&calendar_id, &events)
        .await;

    let _ = printer.await;

    println!(
        "\nDeleted {} of {} ({})",
        result.deleted_count,
        result.total_count,
        result.status.render()
    );
    for line in render::failures(&result.outcomes, |i| events[i].title.as_str()) {
        println!("{}", line);
    }

    exit_status(result.status, result.failed_count())
}
