//! Terminal rendering for previews and batch results.

use calgen_core::progress::{BatchStatus, ItemOutcome};
use calgen_core::{EventDescriptor, EventTime, RemoteEvent};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventTime {
    fn render(&self) -> String {
        match self {
            EventTime::Date(date) => date.format("%Y-%m-%d (%a)").to_string(),
            EventTime::DateTime(dt) => dt.format("%Y-%m-%d (%a) %H:%M").to_string(),
        }
    }
}

impl Render for EventDescriptor {
    fn render(&self) -> String {
        let time = match (&self.start, &self.end) {
            (EventTime::DateTime(_), EventTime::DateTime(end)) => {
                format!("{}-{}", self.start.render(), end.format("%H:%M"))
            }
            _ => self.start.render(),
        };
        format!("{}  {}", time.dimmed(), self.title)
    }
}

impl Render for RemoteEvent {
    fn render(&self) -> String {
        format!("{}  {}", self.start.render().dimmed(), self.title)
    }
}

impl Render for BatchStatus {
    fn render(&self) -> String {
        match self {
            BatchStatus::Completed => "completed".green().to_string(),
            BatchStatus::Cancelled => "cancelled".yellow().to_string(),
            BatchStatus::AuthExpired => "authorization expired".red().to_string(),
            BatchStatus::CalendarNotFound => "calendar not found".red().to_string(),
        }
    }
}

/// Numbered list of generated events, one per line.
pub fn preview(events: &[EventDescriptor]) -> String {
    if events.is_empty() {
        return "No events generated".dimmed().to_string();
    }

    let width = events.len().to_string().len();
    let mut lines: Vec<String> = events
        .iter()
        .enumerate()
        .map(|(i, event)| format!("{:>width$}. {}", i + 1, event.render()))
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        events.len(),
        if events.len() == 1 { "event" } else { "events" }
    ));
    lines.join("\n")
}

/// One line per failed item, labelled with the title it was submitted under.
pub fn failures<'a>(outcomes: &[ItemOutcome], label: impl Fn(usize) -> &'a str) -> Vec<String> {
    outcomes
        .iter()
        .filter(|o| !o.succeeded)
        .map(|o| {
            format!(
                "   {} {} {}",
                "✗".red(),
                label(o.index),
                o.error_message.as_deref().unwrap_or_default().dimmed()
            )
        })
        .collect()
}
