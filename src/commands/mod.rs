pub mod anniversary;
pub mod biweekly;
pub mod create_calendar;
pub mod delete_all;
pub mod login;
pub mod memorial;

use anyhow::{Result, bail};
use calgen_core::EventDescriptor;
use calgen_core::config::CalGenConfig;
use calgen_core::identity::{Credential, IdentityProvider};
use calgen_core::progress::{BatchStatus, Progress};
use calgen_core::register::Registrar;
use calgen_provider_google::{GoogleCalendarStore, Session};
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::OutputArgs;
use crate::render::{self, Render};

/// Loaded configuration plus wherever the access token comes from.
pub struct Context {
    pub config: CalGenConfig,
    token: Option<String>,
}

impl Context {
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Context::new(CalGenConfig::load()?, token))
    }

    pub fn new(config: CalGenConfig, token: Option<String>) -> Self {
        Context { config, token }
    }

    /// The `--token` value if given, else the stored session. The session
    /// file is only read here, so `login` and `logout` never parse it.
    pub fn credential(&self) -> Result<Credential> {
        let session = match &self.token {
            Some(token) => Session::from_token(token.clone()),
            None => Session::load(&self.config.session_path())?,
        };
        Ok(session.credential()?)
    }

    /// `--calendar` if given, else `default_calendar` from config.
    pub fn calendar_id(&self, flag: Option<String>) -> Result<String> {
        match flag.or_else(|| self.config.default_calendar.clone()) {
            Some(id) => Ok(id),
            None => bail!(
                "No calendar given.\n\
                 Pass --calendar <id>, or set default_calendar in {}",
                CalGenConfig::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "config.toml".to_string())
            ),
        }
    }
}

/// Cancelled on the first Ctrl-C. The in-flight call finishes; nothing
/// further is sent.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{}", "Stopping after the current request...".yellow());
            token.cancel();
        }
    });
    cancel
}

/// Preview the generated events, and register them if asked to.
pub async fn preview_or_register(
    ctx: &Context,
    events: Vec<EventDescriptor>,
    output: &OutputArgs,
) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        println!("{}", render::preview(&events));
    }

    if !output.register {
        return Ok(());
    }
    if events.is_empty() {
        println!("{}", "Nothing to register".dimmed());
        return Ok(());
    }

    let calendar_id = ctx.calendar_id(output.calendar.clone())?;
    let credential = ctx.credential()?;
    let store = GoogleCalendarStore::new(&credential);

    let (tx, mut rx) = mpsc::unbounded_channel::<Progress<EventDescriptor>>();
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

    println!("\nRegistering into {}", calendar_id.bold());

    let result = Registrar::new(&store, ctx.config.pacing())
        .with_progress(tx)
        .with_cancellation(cancel_on_ctrl_c())
        .register_all(&calendar_id, &events)
        .await;

    // The registrar owned the only sender, so the printer drains and exits
    let _ = printer.await;

    println!(
        "\nRegistered {} of {} ({})",
        result.created_count,
        result.total_count,
        result.status.render()
    );
    for line in render::failures(&result.outcomes, |i| events[i].title.as_str()) {
        println!("{}", line);
    }

    exit_status(result.status, result.failed_count())
}

/// Fatal batch statuses and partial failures become a non-zero exit.
pub fn exit_status(status: BatchStatus, failed: usize) -> Result<()> {
    match status {
        BatchStatus::AuthExpired => bail!(
            "Google rejected the access token.\n\
             Run `calgen login <token>` with a fresh token and try again."
        ),
        BatchStatus::CalendarNotFound => bail!(
            "Calendar not found.\n\
             Check the calendar id, or create one with `calgen create-calendar <name>`."
        ),
        BatchStatus::Cancelled => bail!("Cancelled"),
        BatchStatus::Completed if failed > 0 => {
            bail!("{} {} failed", failed, if failed == 1 { "item" } else { "items" })
        }
        BatchStatus::Completed => Ok(()),
    }
}
