//! OSC controller replay tool
//!
//! Feeds scripted or hand-typed controller messages through the controller
//! core and prints the authoritative values.

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use osc_controller::config::CoreConfig;
use osc_controller::replay::{load_script, replay, ReplayReport};

/// Replay OSC controller messages through the timestamp-ordered controller core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (optional)
    #[arg(short, long, env = "OSC_CONTROLLER_CONFIG")]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace); defaults to the config value
    #[arg(short, long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// CSV script to replay (address,id,mode,value,ts)
    #[arg(short, long)]
    replay: Option<String>,

    /// Print replay results as JSON
    #[arg(long)]
    json: bool,

    /// Start an interactive prompt (after the replay, if any)
    #[arg(long)]
    repl: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Configuration is needed before logging for its defaults
    let config = match &args.config {
        Some(path) => CoreConfig::load(path).await?,
        None => CoreConfig::default(),
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, config.logging.json)?;

    info!("Starting OSC controller core...");
    if let Some(path) = &args.config {
        info!(
            "Configuration loaded from {} ({} preset controllers)",
            path,
            config.controllers.len()
        );
    }

    let mut registry = config.build_registry()?;
    info!(
        "Registry initialized with {} preset controllers (encoder sensitivity {})",
        registry.len(),
        registry.factory().encoder_sensitivity()
    );

    if let Some(path) = &args.replay {
        let messages = load_script(path).await?;
        let report = replay(&mut registry, &messages);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
            println!("\n{}", "Final state:".bold());
            cli::print_snapshot(&registry.snapshot());
        }
    }

    if args.repl {
        cli::run_repl(&mut registry)?;
    } else if args.replay.is_none() {
        println!("Nothing to do: pass --replay <script.csv> and/or --repl");
    }

    info!("OSC controller core shutdown complete");
    Ok(())
}

fn print_report(report: &ReplayReport) {
    println!("\n{}", "=== Replay ===".bold().cyan());
    for (idx, result) in report.results.iter().enumerate() {
        print!("{:>4}", idx + 1);
        match result {
            Some(feedback) => cli::print_feedback(feedback),
            None => println!("  {}", "dropped (unrecognized address)".red()),
        }
    }

    println!(
        "\n  Total: {}  applied: {}  out-of-range: {}  stale: {}  dropped: {}",
        report.total().to_string().bold(),
        report.applied.to_string().green(),
        report.out_of_range.to_string().yellow(),
        report.stale.to_string().red(),
        report.dropped.to_string().red()
    );
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
