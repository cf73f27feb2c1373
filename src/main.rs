//! Lexibot CLI - posts the word of the day.

use anyhow::{Context, Result};
use clap::Parser;
use lexibot::config::Config;
use lexibot::console::Console;
use lexibot::logging::{DEFAULT_FILTER, init_logging};
use lexibot::pipeline::{Pipeline, invoke};
use std::path::PathBuf;

/// Fetches the word of the day, looks it up and posts it to Bluesky.
#[derive(Parser, Debug)]
#[command(name = "lexibot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use the local fixture and skip posting, regardless of DEBUG.
    #[arg(long)]
    debug: bool,

    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run as a function invocation and print the JSON response.
    #[arg(long)]
    invoke: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(DEFAULT_FILTER);

    let mut config =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if args.debug {
        config.debug = true;
    }

    if args.invoke {
        let response = invoke(&config, &Console::quiet()).await;
        println!("{}", serde_json::to_string(&response)?);
        if !response.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let console = Console::new();
    console.section("Lexibot - Word of the Day");

    config.validate().context("Invalid configuration")?;

    let report = Pipeline::new(&config, &console)
        .context("Failed to set up pipeline")?
        .run()
        .await
        .context("Word of the day run failed")?;

    match &report.receipt {
        Some(receipt) => console.success(&format!("Published {}", receipt.uri)),
        None => console.info("Dry run complete, nothing posted"),
    }

    console.section("Done!");
    Ok(())
}
