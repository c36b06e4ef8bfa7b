mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use commands::Context;

#[derive(Parser)]
#[command(name = "calgen", version)]
#[command(about = "Generate anniversary, memorial and biweekly events and register them in Google Calendar")]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Google access token to use instead of the stored session
    #[arg(long, global = true, env = "CALGEN_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every generator command.
#[derive(Args)]
pub struct OutputArgs {
    /// Register the generated events instead of only previewing them
    #[arg(long)]
    register: bool,

    /// Calendar to register into (defaults to default_calendar from config)
    #[arg(short, long)]
    calendar: Option<String>,

    /// Print the preview as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an access token for later commands
    Login {
        /// OAuth access token with the calendar scope
        access_token: String,

        /// Seconds until the token expires
        #[arg(long)]
        expires_in: Option<i64>,
    },
    /// Forget the stored access token
    Logout,
    /// Yearly or monthly anniversaries
    Anniversary {
        /// First occurrence (e.g., "2024-01-10" or "2024-01-10T19:00")
        #[arg(short, long)]
        start: String,

        /// "yearly" or "monthly"
        #[arg(short, long, default_value = "yearly")]
        interval: String,

        /// Number of occurrences
        #[arg(short = 'n', long)]
        count: u32,

        /// Title template; "#" is the running count ("#年#ヶ月" for monthly)
        #[arg(short, long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Memorial observances from a date of death
    Memorial {
        /// Date of death (YYYY-MM-DD)
        #[arg(short, long)]
        base_date: String,

        /// Leave out year observances after this many years
        #[arg(long, default_value_t = calgen_core::generate::memorial::DEFAULT_UNTIL_YEARS)]
        until_years: u32,

        /// Do not add an event on the date of death itself
        #[arg(long)]
        no_base_day: bool,

        /// Title template with {{houyou}}, {{year}} and {{base_date}}
        #[arg(short, long, default_value = calgen_core::generate::memorial::DEFAULT_TITLE_TEMPLATE)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Meetings every other week on a fixed weekday
    Biweekly {
        /// First possible date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Last possible date, inclusive (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,

        /// 0-6 (0 = Sunday), "mon", "monday" or "月曜"
        #[arg(short, long, default_value = "mon")]
        weekday: String,

        /// Time of day as HH:MM-HH:MM
        #[arg(long)]
        time: String,

        #[arg(short, long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// Leave out meetings that fall on a public holiday
        #[arg(long)]
        skip_holidays: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create a new calendar and print its id
    CreateCalendar {
        name: String,
    },
    /// Permanently delete every event in a calendar
    DeleteAll {
        /// Calendar to empty (defaults to default_calendar from config)
        #[arg(short, long)]
        calendar: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_json);

    let ctx = Context::load(cli.token)?;

    match cli.command {
        Commands::Login {
            access_token,
            expires_in,
        } => commands::login::run(&ctx, access_token, expires_in),
        Commands::Logout => commands::login::logout(&ctx),
        Commands::Anniversary {
            start,
            interval,
            count,
            title,
            description,
            output,
        } => {
            commands::anniversary::run(&ctx, &start, &interval, count, title, description, &output)
                .await
        }
        Commands::Memorial {
            base_date,
            until_years,
            no_base_day,
            title,
            description,
            output,
        } => {
            commands::memorial::run(
                &ctx,
                &base_date,
                until_years,
                !no_base_day,
                title,
                description,
                &output,
            )
            .await
        }
        Commands::Biweekly {
            start,
            end,
            weekday,
            time,
            title,
            description,
            skip_holidays,
            output,
        } => {
            let params = commands::biweekly::Params {
                start,
                end,
                weekday,
                time,
                title,
                description,
                skip_holidays,
            };
            commands::biweekly::run(&ctx, params, &output).await
        }
        Commands::CreateCalendar { name } => commands::create_calendar::run(&ctx, &name).await,
        Commands::DeleteAll { calendar, yes } => {
            commands::delete_all::run(&ctx, calendar, yes).await
        }
    }
}
