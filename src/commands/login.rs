use anyhow::Result;
use calgen_provider_google::{Session, SessionData};
use owo_colors::OwoColorize;

use super::Context;

pub fn run(ctx: &Context, access_token: String, expires_in: Option<i64>) -> Result<()> {
    let path = ctx.config.session_path();
    let data = SessionData::new(access_token, expires_in);

    Session::save(&path, &data)?;

    println!("{} Saved access token to {}", "✓".green(), path.display());
    if let Some(expires_at) = data.expires_at() {
        println!(
            "   {}",
            format!("expires {}", expires_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
        );
    }

    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    let path = ctx.config.session_path();

    if Session::clear(&path)? {
        println!("{} Removed {}", "✓".green(), path.display());
    } else {
        println!("{}", "Not logged in".dimmed());
    }

    Ok(())
}
