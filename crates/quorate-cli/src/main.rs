//! Quorate CLI - self-consistency querying from the command line

mod cli;
mod console;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use quorate_core::{Quorate, QuorateConfig, Reporter, TracingReporter};
use quorate_gemini::GeminiGenerator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{load_config, AskArgs, Cli, Commands};
use crate::console::ConsoleReporter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Check) => check(&config),
        Some(Commands::Ask(args)) => ask(config, &args).await,
        None => ask(config, &AskArgs::default()).await,
    }
}

/// RUST_LOG wins over -v. Logs go to stderr so stdout carries only output.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn check(config: &QuorateConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

async fn ask(mut config: QuorateConfig, args: &AskArgs) -> Result<()> {
    args.apply(&mut config);
    let system_prompt = args.system_prompt();
    let user_prompt = args.user_prompt()?;

    let timeout = config.sampling.call_timeout_secs.map(Duration::from_secs);
    let gemini = GeminiGenerator::from_env(
        &config.provider.api_key_env,
        config.provider.base_url.as_str(),
        timeout,
    )?;

    // JSON keeps stdout machine-readable; progress goes to the log instead.
    let reporter: Arc<dyn Reporter> = if args.json {
        Arc::new(TracingReporter)
    } else {
        Arc::new(ConsoleReporter)
    };
    let mode = config.sampling.mode;
    let quorate = Quorate::new(Arc::new(gemini), config)?.with_reporter(reporter);

    info!("Starting Quorate in {} mode", mode);
    let report = quorate.generate(&system_prompt, &user_prompt, mode).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
