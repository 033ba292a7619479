//! `shorty` - terminal front end for the shortener API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (QR requested by default)
//! shorty shorten https://example.com/a --code crina2025 --expires-at 2026-01-08T12:00
//!
//! # Save the QR image returned by the server
//! shorty shorten https://example.com/a --qr-out qr.png
//!
//! # List links
//! shorty links
//!
//! # Show analytics for one code
//! shorty stats crina2025
//!
//! # Pick links interactively and inspect their stats
//! shorty browse
//! ```
//!
//! # Environment Variables
//!
//! See [`shorty_client::config`]. A `.env` file in the working directory is loaded first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Select;
use tracing_subscriber::EnvFilter;

use shorty_client::config;
use shorty_client::prelude::*;
use shorty_client::utils::dates::format_local;

/// Command-line client for the shortener API.
#[derive(Parser)]
#[command(name = "shorty")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Long URL to shorten (http or https)
        url: String,

        /// Custom short code (6-16 letters or digits)
        #[arg(short, long)]
        code: Option<String>,

        /// Do not request a QR code
        #[arg(long)]
        no_qr: bool,

        /// Expiry: RFC 3339, or local time as YYYY-MM-DDTHH:MM
        #[arg(short, long)]
        expires_at: Option<String>,

        /// Write the returned QR image to this file
        #[arg(long)]
        qr_out: Option<PathBuf>,
    },

    /// List all links
    Links,

    /// Show analytics for a short code
    Stats {
        /// Short code to inspect
        code: String,
    },

    /// Browse links interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    init_tracing(&config);
    config.print_summary();

    let state = AppState::from_config(config).context("Failed to create API client")?;

    let result = match cli.command {
        Commands::Shorten {
            url,
            code,
            no_qr,
            expires_at,
            qr_out,
        } => {
            let form = ShortenForm {
                url,
                custom_code: code.unwrap_or_default(),
                want_qr: !no_qr,
                expires_at: expires_at.unwrap_or_default(),
            };
            handle_shorten(&state, form, qr_out, cli.json).await
        }
        Commands::Links => handle_links(&state, cli.json).await,
        Commands::Stats { code } => handle_stats(&state, &code, cli.json).await,
        Commands::Browse => handle_browse(&state).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn handle_shorten(
    state: &AppState,
    form: ShortenForm,
    qr_out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let app = &state.orchestrator;
    app.shorten().set_form(form);

    let created = app.submit_shorten().await?.into_result();

    if let Some(path) = qr_out {
        match &created.qr_image {
            Some(qr) => {
                tokio::fs::write(&path, qr.image_bytes()?)
                    .await
                    .with_context(|| format!("Failed to write QR image to {}", path.display()))?;
            }
            None => eprintln!("{}", "⚠️  Server returned no QR image".yellow()),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Code:      {}", created.code.bright_yellow().bold());
    println!("  Short URL: {}", created.short_url.cyan());
    if state.config.display_url.is_some() {
        println!(
            "  Share as:  {}",
            state.display_short_url(&created.code).cyan()
        );
    }
    if created.qr_image.is_some() {
        println!("  QR:        {}", "included".bright_black());
    }

    if let Some(err) = app.links().state().error() {
        println!();
        println!(
            "{} {}",
            "⚠️  Listing refresh failed:".yellow(),
            err.yellow()
        );
    }
    println!();

    Ok(())
}

async fn handle_links(state: &AppState, json: bool) -> Result<()> {
    let app = &state.orchestrator;
    app.start().await?;

    let listing = app.links().state();

    if json {
        println!("{}", serde_json::to_string_pretty(listing.links())?);
        return Ok(());
    }

    print_links(&listing, None);
    Ok(())
}

async fn handle_stats(state: &AppState, code: &str, json: bool) -> Result<()> {
    let app = &state.orchestrator;
    app.inspect(code).await?;

    let inspected = app.stats().state();
    let stats = inspected.stats().context("Short code must not be empty")?;

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    print_stats(state, stats);
    Ok(())
}

/// Interactive loop: row selection loads stats for that row.
async fn handle_browse(state: &AppState) -> Result<()> {
    let app = &state.orchestrator;

    if let Err(e) = app.start().await {
        eprintln!("{} {}", "Failed to load links:".red(), e);
    }

    loop {
        let listing = app.links().state();
        print_links(&listing, app.active_code().as_deref());

        let mut items: Vec<String> = listing
            .links()
            .iter()
            .map(|link| format!("{:<18} {}", link.code, link.original_url))
            .collect();
        let refresh_index = items.len();
        items.push("↻ Refresh".to_string());
        items.push("Quit".to_string());

        let choice = Select::new()
            .with_prompt("Select a link")
            .items(&items)
            .default(0)
            .interact()?;

        if choice < refresh_index {
            match app.select_row(choice).await {
                Ok(()) => {
                    if let Some(stats) = app.stats().state().stats() {
                        print_stats(state, stats);
                    }
                }
                Err(e) => eprintln!("{} {}", "Failed to load stats:".red(), e),
            }
        } else if choice == refresh_index {
            if let Err(e) = app.refresh_links().await {
                eprintln!("{} {}", "Failed to refresh links:".red(), e);
            }
        } else {
            break;
        }
    }

    Ok(())
}

/// Prints the listing table.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code               Clicks  Unique  Expires           Original
///   ─────────────────────────────────────────────────────────────────────
///   crina2025               5       3  2026-01-08 12:00  https://example.com/a
/// ```
fn print_links(listing: &LinksState, active: Option<&str>) {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    if let Some(err) = listing.error() {
        println!("  {} {}", "⚠️ ".yellow(), err.red());
        if listing.loaded_once() {
            println!("  {}", "Showing the last loaded listing".bright_black());
        }
        println!();
    }

    if !listing.loaded_once() {
        return;
    }

    if listing.links().is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        return;
    }

    println!(
        "  {:<18} {:>6}  {:>6}  {:<16}  {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Unique".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Original".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for link in listing.links() {
        let expired = link.is_expired_at(now);
        let code = format!("{:<18}", link.code);
        let code = if active == Some(link.code.as_str()) {
            code.bright_yellow().bold()
        } else if expired {
            code.bright_black()
        } else {
            code.cyan()
        };
        let expires = if expired {
            format!("{:<16}", "expired").red()
        } else {
            format!("{:<16}", format_local(link.expires_at)).bright_black()
        };

        println!(
            "  {} {:>6}  {:>6}  {}  {}",
            code, link.clicks, link.unique_visitors, expires, link.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        listing.links().len().to_string().bright_white().bold()
    );
    println!();
}

fn print_stats(state: &AppState, stats: &LinkStats) {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!("  Code:            {}", stats.code.bright_yellow().bold());
    println!("  Short URL:       {}", state.display_short_url(&stats.code).cyan());
    println!("  Original:        {}", stats.original_url);
    println!(
        "  Clicks:          {}",
        stats.clicks.to_string().bright_white().bold()
    );
    println!(
        "  Unique visitors: {}",
        stats.unique_visitors.to_string().bright_white().bold()
    );
    println!("  Expires:         {}", format_local(stats.expires_at));
    println!();

    if !stats.has_geo_data() {
        println!("{}", "  No geographic data yet".bright_black());
        println!();
        return;
    }

    println!(
        "  {:<10} {:>8}",
        "Country".bright_white().bold(),
        "Clicks".bright_white().bold()
    );
    println!("  {}", "─".repeat(19).bright_black());
    for (country, clicks) in stats.countries_by_clicks() {
        println!("  {:<10} {:>8}", country.cyan(), clicks);
    }
    println!();
}
