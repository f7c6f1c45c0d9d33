// src/main.rs
use std::process::exit;
use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vega_parallel::{App, Args, Settings};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let code = match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            debug!(error = ?e, "Run aborted");
            eprintln!("Error: {:#}", e);
            1
        }
    };

    exit(code);
}

async fn run(args: &Args) -> Result<i32> {
    let settings = Settings::load(args.config.as_deref())?;
    App::new(settings).run(args).await
}

/// Logs go to stderr; stdout carries only model output and progress lines
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,vega_parallel={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
