//! End-to-end scrape: URL → fetch → parse → extract → report.

use tracing::{info, instrument, warn};
use url::Url;

use patchtracker_fetch::{FetchOptions, RawDocument};
use patchtracker_shared::{FetchError, LayoutConfig, PatchEntry, Result, ScrapeConfig};

use crate::report::{Report, build_report};

/// Result of one scrape.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// Page that was requested.
    pub url: Url,
    /// Date headers on the page, before the entry cap.
    pub headers_found: usize,
    /// Extracted entries; empty when the fetch failed.
    pub entries: Vec<PatchEntry>,
    /// Summary built from `entries`.
    pub report: Report,
    /// Why the page could not be fetched, if it could not.
    pub error: Option<FetchError>,
}

impl ScrapeOutcome {
    fn failed(url: Url, err: FetchError) -> Self {
        Self {
            url,
            headers_found: 0,
            entries: Vec::new(),
            report: build_report(&[]),
            error: Some(err),
        }
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called right before the request goes out.
    fn fetching(&self, url: &Url);
    /// Called when the page arrived.
    fn fetched(&self, doc: &RawDocument);
    /// Called when the fetch failed; nothing else follows.
    fn failed(&self, url: &Url, err: &FetchError);
    /// Called once extraction is done.
    fn extracted(&self, headers_found: usize, entries: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn fetching(&self, _url: &Url) {}
    fn fetched(&self, _doc: &RawDocument) {}
    fn failed(&self, _url: &Url, _err: &FetchError) {}
    fn extracted(&self, _headers_found: usize, _entries: usize) {}
}

/// Run one fetch-and-report cycle.
///
/// A failed fetch is not an error here: it is reported through `progress`,
/// logged, and yields an empty outcome without touching the extractor.
/// Only an unusable configured URL returns `Err`.
#[instrument(skip_all, fields(url = %config.fetch.url))]
pub async fn run(config: &ScrapeConfig, progress: &dyn ProgressReporter) -> Result<ScrapeOutcome> {
    let url = config.target_url()?;
    let opts = FetchOptions::from(&config.fetch);

    progress.fetching(&url);

    let doc = match patchtracker_fetch::fetch(&url, &opts).await {
        Ok(doc) => doc,
        Err(err) => {
            warn!(error = %err, "fetch failed, nothing to report");
            progress.failed(&url, &err);
            return Ok(ScrapeOutcome::failed(url, err));
        }
    };

    progress.fetched(&doc);

    let (headers_found, entries) = process(&doc.body, &config.layout);
    progress.extracted(headers_found, entries.len());

    let report = build_report(&entries);

    info!(
        headers_found,
        entries = entries.len(),
        top_heroes = report.top_heroes.len(),
        "scrape completed"
    );

    Ok(ScrapeOutcome {
        url,
        headers_found,
        entries,
        report,
        error: None,
    })
}

/// Parse and extract a fetched page. Returns the number of date headers seen
/// and the extracted entries.
pub fn process(raw_html: &str, layout: &LayoutConfig) -> (usize, Vec<PatchEntry>) {
    let doc = patchtracker_notes::parse(raw_html);
    let headers_found = patchtracker_notes::count_date_headers(&doc, layout);
    let entries = patchtracker_notes::extract(&doc, layout);
    (headers_found, entries)
}
