//! CLI administration tool for token-shortener.
//!
//! Provides commands for managing users and their tokens, viewing
//! statistics, and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a user and print their token
//! cargo run --bin admin -- user register --name Alice --email alice@example.com
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Issue a fresh token to user 3
//! cargo run --bin admin -- user renew 3
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components) and
//! `TOKEN_SIGNING_SECRET`, which must match the server's value for issued
//! tokens to be accepted. `TOKEN_VALIDITY_DAYS` applies as well.

use token_shortener::application::services::{IssuedToken, LinkService, TokenService};
use token_shortener::config::{self, Config, StoreBackend};
use token_shortener::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use token_shortener::server::connect_pool;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;
use validator::ValidateEmail;

/// CLI tool for managing token-shortener.
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
    /// Manage users and their tokens
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a user and issue their first token
    Register {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Replace a user's token, invalidating the current one
    Renew {
        /// User ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type PgTokenService = TokenService<PgUserRepository>;
type PgLinkService = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.store_backend != StoreBackend::Postgres {
        anyhow::bail!("The admin tool only works with STORE_BACKEND=postgres");
    }
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = Arc::new(connect_pool(&config, &database_url).await?);

    let tokens = PgTokenService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        config.token_signing_secret.clone(),
        config.token_validity_days,
    );
    let links = PgLinkService::new(
        Arc::new(PgLinkRepository::new(pool)),
        config.public_base_url.clone(),
    );

    match cli.command {
        Commands::User { action } => handle_user_action(action, &tokens, &config).await?,
        Commands::Stats => handle_stats(&tokens, &links).await?,
        Commands::Db { action } => handle_db_action(action, &links).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(
    action: UserAction,
    tokens: &PgTokenService,
    config: &Config,
) -> Result<()> {
    match action {
        UserAction::Register { name, email, yes } => {
            register_user(tokens, config, name, email, yes).await?;
        }
        UserAction::List => {
            list_users(tokens).await?;
        }
        UserAction::Renew { id, yes } => {
            renew_user(tokens, config, id, yes).await?;
        }
    }

    Ok(())
}

/// Registers a user with interactive prompts for missing fields.
///
/// The raw token is printed once; only its HMAC digest is stored.
async fn register_user(
    tokens: &PgTokenService,
    config: &Config,
    name: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Register User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Name must not be empty");
    }

    let email: String = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                if input.validate_email() {
                    Ok(())
                } else {
                    Err("Invalid email address")
                }
            })
            .interact_text()?,
    };
    if !email.validate_email() {
        anyhow::bail!("Invalid email address: {email}");
    }

    println!("  Name:  {}", name.cyan());
    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let issued = tokens
        .register(name, email)
        .await
        .context("Failed to register user")?;

    println!();
    println!("{}", "✅ User registered successfully!".green().bold());
    print_issued_token(&issued, config);

    Ok(())
}

/// Lists all users with token status.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Name                 Email                          Expires            Status
///   ───────────────────────────────────────────────────────────────────────────────────
///   1   Alice                alice@example.com              2025-01-08 12:00   ACTIVE
///   2   Bob                  bob@example.com                2024-12-01 09:15   EXPIRED
/// ```
async fn list_users(tokens: &PgTokenService) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = tokens
        .list_users()
        .await
        .context("Failed to list users")?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Register one with: {} admin user register",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<18} {:<8}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(83).bright_black());

    let now = Utc::now();
    for user in &users {
        let status = if user.is_expired_at(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<20} {:<30} {:<18} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            user.expires_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Issues a new token for a user, expired or not.
///
/// Requires confirmation (default: No) since the current token stops working.
async fn renew_user(
    tokens: &PgTokenService,
    config: &Config,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔄 Renew Token".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Replace the token of user {id}? The current token stops working."
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let issued = tokens
        .renew_by_id(id)
        .await
        .context("Failed to renew token")?;

    println!();
    println!("{}", "✅ Token renewed successfully!".green().bold());
    print_issued_token(&issued, config);

    Ok(())
}

fn print_issued_token(issued: &IssuedToken, config: &Config) {
    println!();
    println!("  User:    {}", issued.user.id.to_string().bright_black());
    println!("  Token:   {}", issued.token.bright_yellow().bold());
    println!(
        "  Expires: {}",
        issued.expires_at().format("%Y-%m-%d %H:%M UTC").to_string().cyan()
    );
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"x-api-key: {}\" {}/links",
        issued.token.bright_yellow(),
        config.public_base_url.trim_end_matches('/')
    );
    println!();
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users, and how many of them hold a valid token
/// - Total number of links
/// - Total number of clicks
async fn handle_stats(tokens: &PgTokenService, links: &PgLinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users = tokens
        .list_users()
        .await
        .context("Failed to list users")?;
    let now = Utc::now();
    let active = users.iter().filter(|u| !u.is_expired_at(now)).count();

    let (links_count, clicks_count) = links
        .totals()
        .await
        .context("Failed to count links")?;

    println!(
        "  Users:         {}",
        users.len().to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        active.to_string().bright_green().bold()
    );
    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, links: &PgLinkService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            links
                .ping()
                .await
                .context("Database check failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
