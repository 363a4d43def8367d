//! Quotes-Harvest main entry point
//!
//! This is the command-line interface for the Quotes-Harvest scraper.

use anyhow::Context;
use clap::Parser;
use quotes_harvest::config::{load_config_with_hash, validate, Config};
use quotes_harvest::output::print_statistics;
use quotes_harvest::pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quotes-Harvest: scrape quotes to CSV and a spreadsheet report
///
/// Follows the "next page" links of a quotes listing from its first page,
/// removes duplicate quotes, and writes a CSV. With --excel it also writes
/// one workbook with sheets for all quotes, counts by author, and counts by tag.
#[derive(Parser, Debug)]
#[command(name = "quotes-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Scrape quotes to CSV/Excel (single book with multiple sheets)", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum pages to fetch (0 means all)
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Seconds to sleep between page requests
    #[arg(long, value_name = "SECS")]
    sleep: Option<f64>,

    /// Also save the spreadsheet report (one file, multiple sheets)
    #[arg(long)]
    excel: bool,

    /// Override the CSV output path
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Override the spreadsheet report path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_pages) = self.max_pages {
            config.scrape.max_pages = max_pages;
        }
        if let Some(sleep) = self.sleep {
            config.scrape.sleep_secs = sleep;
        }
        if let Some(csv) = &self.csv {
            config.output.csv_path = csv.clone();
        }
        if let Some(report) = &self.report {
            config.output.report_path = report.clone();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    tracing::info!(
        "Starting harvest at {} (max pages: {}, sleep: {}s)",
        config.site.base_url,
        config
            .scrape
            .page_limit()
            .map_or_else(|| "all".to_string(), |n| n.to_string()),
        config.scrape.sleep_secs
    );

    let stats = pipeline::run(&config, cli.excel)
        .await
        .context("Harvest failed")?;

    if stats.unique_records == 0 {
        println!("No data collected.");
        return Ok(());
    }

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quotes_harvest=info,warn"),
            1 => EnvFilter::new("quotes_harvest=debug,info"),
            2 => EnvFilter::new("quotes_harvest=trace,debug"),
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
