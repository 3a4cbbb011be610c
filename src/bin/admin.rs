//! CLI administration tool for shorter.
//!
//! Provides database maintenance and short link inspection without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # List the first 20 short links
//! cargo run --bin admin -- short list --limit 20
//!
//! # Delete every short link
//! cargo run --bin admin -- short purge
//! ```
//!
//! # Environment Variables
//!
//! Reads the same `DATABASE_URL` / `CONFIG__DATABASE__*` variables as the
//! server, including `.env`.

use shorter::application::services::ShortService;
use shorter::config::{self, DatabaseDriver};
use shorter::domain::entities::Short;
use shorter::error::AppError;
use shorter::infrastructure::persistence::{PgShortRepository, pool};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorter.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect and manage short links
    Short {
        #[command(subcommand)]
        action: ShortAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

/// Short link subcommands.
#[derive(Subcommand)]
enum ShortAction {
    /// List short links, oldest first
    List {
        /// Maximum number of links to show
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,
    },

    /// Delete every short link
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.database.driver == DatabaseDriver::Memory {
        anyhow::bail!("The admin tool needs PostgreSQL, CONFIG__DATABASE__DRIVER is 'memory'");
    }

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &config.database).await?,
        Commands::Short { action } => {
            let pool = pool::connect(&config.database, &config.database.database_url()?).await?;
            handle_short_action(action, pool).await?
        }
    }

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, database: &config::DatabaseConfig) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = pool::connect(database, &database.database_url()?).await?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            pool::migrate(database).await?;

            println!("{}", "✅ Database is up to date".green().bold());
        }
    }

    Ok(())
}

/// Dispatches short link commands.
async fn handle_short_action(action: ShortAction, pool: PgPool) -> Result<()> {
    let service = ShortService::new(Arc::new(PgShortRepository::new(Arc::new(pool))));

    match action {
        ShortAction::List { limit } => list_shorts(&service, limit).await,
        ShortAction::Purge { yes } => purge_shorts(&service, yes).await,
    }
}

/// Prints short links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   Code    URL                                      Created           Status
///   ──────────────────────────────────────────────────────────────────────────
///   abc123  https://example.com/                     2026-01-15 10:30  ACTIVE
/// ```
async fn list_shorts(service: &ShortService<PgShortRepository>, limit: Option<i64>) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let shorts = match service.list_shorts(limit).await {
        Ok(shorts) => shorts,
        Err(AppError::NotFound(_)) => {
            println!("{}", "  No short links found".yellow());
            return Ok(());
        }
        Err(e) => anyhow::bail!("Failed to list short links: {}", e),
    };

    println!(
        "  {:<7} {:<40} {:<17} {:<8}",
        "Code".bright_white().bold(),
        "URL".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for short in &shorts {
        println!(
            "  {:<7} {:<40} {:<17} {}",
            short.code.cyan(),
            truncate(&short.url, 40),
            short
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status(short)
        );
    }

    println!();
    println!(
        "  Total: {}",
        shorts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes every short link after confirmation (default: No).
async fn purge_shorts(service: &ShortService<PgShortRepository>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Purge Short Links".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL short links? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.delete_all_shorts().await {
        Ok(deleted) => {
            println!(
                "{} {}",
                "✅ Deleted short links:".green().bold(),
                deleted.len().to_string().bright_white().bold()
            );
        }
        Err(AppError::NotFound(_)) => {
            println!("{}", "⚠️  Nothing to delete".yellow());
        }
        Err(e) => anyhow::bail!("Failed to delete short links: {}", e),
    }
    println!();

    Ok(())
}

fn status(short: &Short) -> ColoredString {
    if !short.is_activated {
        "INACTIVE".red()
    } else if short.is_expired() {
        "EXPIRED".yellow()
    } else {
        "ACTIVE".green()
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width - 1).collect();
    format!("{kept}…")
}
