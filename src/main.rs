// CLI entry point.
// Wires the interactive prompts, the fetch pipeline, and the report renderer.

mod cache;
mod cmt;
mod config;
mod error;
mod fetch;
mod report;

use std::io::{self, Write as _};
use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::cmt::CmtClient;
use crate::config::{ConferenceSelection, Credentials};
use crate::error::Result;
use crate::fetch::FetchOptions;
use crate::report::RenderOptions;

#[derive(Parser)]
#[command(
    name = "cmt-reviews",
    version,
    about = "Fetch CMT conference review data and render a static HTML report"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all review data for the selected conference into the local cache
    Fetch,
    /// Render reviews.html from the local cache, no network access
    Render {
        /// Conference id; falls back to the saved selection
        conference_id: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Fetch => run_fetch().await,
        Command::Render { conference_id } => run_render(conference_id),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run_fetch() -> Result<()> {
    let credentials = gather_credentials(Path::new(config::CREDENTIALS_FILE))?;
    let selection = gather_conference(Path::new(config::CONFERENCE_FILE))?;

    info!(
        "processing conference {} as {}",
        selection.conference_id,
        selection.role_label()
    );

    info!("logging in as {}", credentials.username);
    let client = CmtClient::login(&credentials.username, &credentials.password).await?;

    let options = FetchOptions::new(selection.conference_id.clone(), selection.is_meta_reviewer);
    let papers = fetch::run(&client, &options).await?;

    info!(
        "fetched {} papers; run `cmt-reviews render` to build the report",
        papers.len()
    );
    Ok(())
}

fn run_render(conference_id: Option<String>) -> Result<()> {
    let conference_id = match conference_id {
        Some(id) => id,
        None => config::load_conference(Path::new(config::CONFERENCE_FILE))?
            .ok_or(error::CmtError::MissingConference)?
            .conference_id,
    };

    let options = RenderOptions::new(conference_id);
    let out_path = Path::new(report::render::DEFAULT_OUTPUT);
    report::write_report(&options, out_path)?;

    info!("report written to {}", out_path.display());
    Ok(())
}

/// Confirm or collect credentials, persisting any newly entered values.
fn gather_credentials(path: &Path) -> Result<Credentials> {
    if let Some(saved) = config::load_credentials(path)? {
        let keep = confirm(&format!("Log in with username {}?", saved.username), true)?;
        if keep {
            return Ok(saved);
        }
    }

    let credentials = Credentials {
        username: prompt("Enter your username (email)")?,
        password: prompt("Enter your password")?,
    };
    config::save_credentials(path, &credentials)?;
    Ok(credentials)
}

/// Confirm or collect the conference selection, persisting new values.
fn gather_conference(path: &Path) -> Result<ConferenceSelection> {
    if let Some(saved) = config::load_conference(path)? {
        let keep = confirm(
            &format!(
                "Fetch {} in role {}?",
                saved.conference_id,
                saved.role_label()
            ),
            true,
        )?;
        if keep {
            return Ok(saved);
        }
    }

    let selection = ConferenceSelection {
        conference_id: prompt("Enter the conference ID")?,
        is_meta_reviewer: confirm("Are you a meta reviewer?", false)?,
    };
    config::save_conference(path, &selection)?;
    Ok(selection)
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn confirm(label: &str, default_yes: bool) -> Result<bool> {
    let choices = if default_yes { "[Y/n]" } else { "[y/N]" };
    print!("{} {}: ", label, choices);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();

    Ok(match answer.as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    })
}
