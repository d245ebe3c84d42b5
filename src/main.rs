//! site-crawler main entry point
//!
//! This is the command-line interface for the site-crawler breadth-first crawler.

use clap::Parser;
use site_crawler::config::{load_config, Config};
use site_crawler::crawler::run_crawl;
use site_crawler::output::{log_statistics, print_report, CrawlStatistics};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// site-crawler: a depth-bounded, breadth-first site crawler
///
/// Crawls a website from a seed URL down to a maximum depth, scores every
/// page by how many of its links stay on the seed's host, and prints a
/// tab-separated report.
#[derive(Parser, Debug)]
#[command(name = "site-crawler")]
#[command(version)]
#[command(about = "A depth-bounded, breadth-first site crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from; `http://` is assumed when no scheme is given
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Deepest level to visit; values below 1 are treated as 1
    #[arg(value_name = "MAX_DEPTH", allow_negative_numbers = true)]
    max_depth: i64,

    /// Also print the errors report
    #[arg(long)]
    report_errors: bool,

    /// Crawl with the configured worker pool instead of a single worker
    #[arg(long)]
    threaded: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn max_depth(&self) -> u32 {
        self.max_depth.clamp(1, i64::from(u32::MAX)) as u32
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version are reported as errors that do not use stderr
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            e.print()?;
            return Ok(ExitCode::FAILURE);
        }
    };

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                e
            })?
        }
        None => Config::default(),
    };

    handle_crawl(&cli, &config).await?;
    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_crawler=info,warn"),
            1 => EnvFilter::new("site_crawler=debug,info"),
            2 => EnvFilter::new("site_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let max_depth = cli.max_depth();
    if i64::from(max_depth) != cli.max_depth {
        tracing::warn!("Max depth {} raised to {}", cli.max_depth, max_depth);
    }

    let records = match run_crawl(config, &cli.seed_url, max_depth, cli.threaded).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&records, cli.report_errors)?;
    log_statistics(&CrawlStatistics::from_records(&records));

    Ok(())
}
