//! Binary crate for the `activity` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts and configuration
//! - Human-friendly output formatting

use std::{env, io};

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

/// Log to stderr so the report on stdout stays clean.
///
/// `RUST_LOG` wins when set; otherwise `ACTIVITY_LOG_LEVEL` (default `warn`).
fn init_tracing() {
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("ACTIVITY_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("error") => "error",
            _ => "warn",
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}
