//! CLI definition, config resolution, tracing setup, and the scrape command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use url::Url;

use patchtracker_core::pipeline::{self, ProgressReporter};
use patchtracker_fetch::RawDocument;
use patchtracker_shared::{FetchError, ScrapeConfig, archive_url, load_config_from};

use crate::render;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Overwatch patch tracker: summarize hero balance changes.
#[derive(Parser, Debug)]
#[command(
    name = "patchtracker",
    version,
    about = "Summarize hero balance changes from the Overwatch patch notes page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Patch notes page to scrape (defaults to the live page).
    #[arg(long, conflicts_with_all = ["year", "month"])]
    pub url: Option<String>,

    /// Archive year; requires --month.
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// Archive month (1-12); requires --year.
    #[arg(long, requires = "year")]
    pub month: Option<u32>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// TOML config file. Never read unless given.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "warn",
        1 => "patchtracker=info,warn",
        2 => "patchtracker=debug,info",
        _ => "patchtracker=trace,debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Defaults, then the explicit config file, then flags.
pub(crate) fn resolve_config(cli: &Cli) -> Result<ScrapeConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)
            .wrap_err_with(|| format!("loading config from {}", path.display()))?,
        None => ScrapeConfig::default(),
    };

    if let Some(url) = &cli.url {
        config.fetch.url = url.clone();
    }
    if let (Some(year), Some(month)) = (cli.year, cli.month) {
        config.fetch.url = archive_url(year, month)?;
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
    }

    debug!(url = %config.fetch.url, timeout_secs = config.fetch.timeout_secs, "config resolved");
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run one fetch-and-report cycle.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    println!("{}", render::banner());

    let reporter = CliProgress::new();
    let outcome = pipeline::run(&config, &reporter).await?;

    if outcome.error.is_some() {
        return Ok(());
    }

    print!("{}", render::render_report(&outcome.report));

    info!(
        url = %outcome.url,
        entries = outcome.report.total_entries,
        "report printed"
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Status lines on stdout plus an indicatif spinner while the request is out.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid spinner template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn fetching(&self, url: &Url) {
        println!("🔍 Fetching patch notes page: {url}");
        self.spinner.set_message("waiting for response");
        self.spinner
            .enable_steady_tick(std::time::Duration::from_millis(80));
    }

    fn fetched(&self, doc: &RawDocument) {
        self.spinner.finish_and_clear();
        println!("✅ Page fetched (status code: {})", doc.status);
    }

    fn failed(&self, _url: &Url, err: &FetchError) {
        self.spinner.finish_and_clear();
        println!("❌ Error: {err}");
    }

    fn extracted(&self, headers_found: usize, _entries: usize) {
        println!("\n📅 Date headers found: {headers_found}");
    }
}
