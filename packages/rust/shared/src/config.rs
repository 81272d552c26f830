//! Application configuration for the patch tracker.
//!
//! Nothing is read from disk unless a config file is passed explicitly.
//! CLI flags override config file values, which override defaults.

use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PatchTrackerError, Result};

/// Live patch notes page scraped when no URL is given.
pub const DEFAULT_URL: &str = "https://overwatch.blizzard.com/en-us/news/patch-notes/live";

/// Base of the monthly patch notes archive (`<base>/<year>/<month>/`).
pub const ARCHIVE_BASE_URL: &str = "https://overwatch.blizzard.com/en-us/news/patch-notes";

/// First year the archive has pages for.
const ARCHIVE_FIRST_YEAR: i32 = 2016;

// ---------------------------------------------------------------------------
// Config structs (matching the TOML schema)
// ---------------------------------------------------------------------------

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// HTTP settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Page structure the extractor walks.
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Page to fetch.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with the request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!(
        "Mozilla/5.0 (compatible; OverwatchPatchTracker/",
        env!("CARGO_PKG_VERSION"),
        ")"
    )
    .into()
}

/// `[layout]` section: tag names of the patch notes markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Tag of the per-patch date headers.
    #[serde(default = "default_date_tag")]
    pub date_tag: String,

    /// Tag of the per-hero headers.
    #[serde(default = "default_subject_tag")]
    pub subject_tag: String,

    /// Tag of the bullet list containers.
    #[serde(default = "default_list_tag")]
    pub list_tag: String,

    /// Tag of the bullet items inside a list.
    #[serde(default = "default_item_tag")]
    pub item_tag: String,

    /// Tag of ability names and developer comments between lists.
    #[serde(default = "default_paragraph_tag")]
    pub paragraph_tag: String,

    /// Only the first N date headers are examined.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            date_tag: default_date_tag(),
            subject_tag: default_subject_tag(),
            list_tag: default_list_tag(),
            item_tag: default_item_tag(),
            paragraph_tag: default_paragraph_tag(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_date_tag() -> String {
    "h3".into()
}
fn default_subject_tag() -> String {
    "h5".into()
}
fn default_list_tag() -> String {
    "ul".into()
}
fn default_item_tag() -> String {
    "li".into()
}
fn default_paragraph_tag() -> String {
    "p".into()
}
fn default_max_entries() -> usize {
    5
}

impl ScrapeConfig {
    /// Parse and validate the configured target URL.
    pub fn target_url(&self) -> Result<Url> {
        let url = Url::parse(&self.fetch.url).map_err(|e| {
            PatchTrackerError::validation(format!("invalid URL '{}': {e}", self.fetch.url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PatchTrackerError::validation(format!(
                "unsupported URL scheme '{other}' in {url}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the configuration from a specific TOML file.
pub fn load_config_from(path: &Path) -> Result<ScrapeConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PatchTrackerError::io(path, e))?;

    let config: ScrapeConfig = toml::from_str(&content).map_err(|e| {
        PatchTrackerError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(?path, url = %config.fetch.url, "loaded config file");
    Ok(config)
}

/// Build the monthly archive URL for `year`/`month`.
pub fn archive_url(year: i32, month: u32) -> Result<String> {
    if !(1..=12).contains(&month) {
        return Err(PatchTrackerError::validation(format!(
            "month {month} out of range (1-12)"
        )));
    }

    let current_year = chrono::Utc::now().year();
    if year < ARCHIVE_FIRST_YEAR || year > current_year + 1 {
        return Err(PatchTrackerError::validation(format!(
            "year {year} out of range ({ARCHIVE_FIRST_YEAR}-{})",
            current_year + 1
        )));
    }

    Ok(format!("{ARCHIVE_BASE_URL}/{year}/{month}/"))
}
