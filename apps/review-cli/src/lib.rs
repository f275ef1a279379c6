//! Command-line front end for the flashcard scheduler.
//!
//! Decks live in JSON files. This crate owns everything the engine leaves to
//! its host: reading the clock, the environment and the filesystem.

pub mod commands;
pub mod config;
pub mod store;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;
use crate::config::AppConfig;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(command = ?cli.command, "parsed command");

    let output = commands::execute(cli.command, &config, Utc::now())?;
    println!("{output}");
    Ok(())
}
