//! Douyu-Playlist main entry point
//!
//! This is the command-line interface for the Douyu directory harvester.

use anyhow::Context;
use clap::Parser;
use douyu_playlist::config::{job_list_fingerprint, load_config, Config};
use douyu_playlist::crawler::harvest;
use douyu_playlist::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Douyu-Playlist: harvests Douyu directory pages into a relay playlist
///
/// Fetches every configured directory page, collects the live rooms listed
/// on each, and writes them as a "title,url" playlist pointing at a local
/// relay. Without a config file the built-in directory list is used.
#[derive(Parser, Debug)]
#[command(name = "douyu-playlist")]
#[command(version = "1.0.0")]
#[command(about = "Harvests Douyu directory pages into a relay playlist", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the playlist here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let config = load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully");
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in directory list");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.output.path = output.to_string_lossy().into_owned();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("douyu_playlist=info,warn"),
            1 => EnvFilter::new("douyu_playlist=debug,info"),
            2 => EnvFilter::new("douyu_playlist=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Douyu-Playlist Dry Run ===\n");

    println!("Fetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Launch delay: {}ms", config.fetch.launch_delay_ms);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nExtractor:");
    println!("  Card selector: {}", config.extractor.card_selector);
    println!(
        "  Title: {} [{}]",
        config.extractor.title_selector, config.extractor.title_attribute
    );
    println!("  Link attribute: {}", config.extractor.link_attribute);

    println!("\nOutput:");
    println!("  Playlist: {}", config.output.path);
    println!("  Relay template: {}", config.output.relay_template);

    println!("\nJobs ({}):", config.jobs.len());
    println!("  Fingerprint: {}", job_list_fingerprint(&config.jobs));
    for job in &config.jobs {
        println!("  - [{}] {}", job.category, job.url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Douyu harvest...");

    match harvest(config).await {
        Ok(report) => {
            tracing::info!(
                "Harvest completed in {:.1}s, playlist at {} (job list {})",
                report.elapsed.as_secs_f64(),
                report.written.path.display(),
                report.job_list
            );
            if !quiet {
                print_statistics(&report.stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
