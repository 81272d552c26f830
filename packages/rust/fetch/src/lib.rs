//! Single-page HTTP fetch for the patch notes page.
//!
//! One GET, one timeout, no retries. Failures are reported as a [`FetchError`]
//! and the caller decides what an empty result means.

use std::time::Duration;

use patchtracker_shared::{FetchConfig, FetchError};
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Default timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum response size we accept (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Final URL after redirects.
    pub url: Url,
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

/// Configuration for a fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout for the whole request, body included, in seconds.
    pub timeout_secs: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Largest body accepted, declared or streamed.
    pub max_body_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for FetchOptions {
    fn from(config: &FetchConfig) -> Self {
        Self {
            timeout_secs: if config.timeout_secs == 0 {
                DEFAULT_TIMEOUT_SECS
            } else {
                config.timeout_secs
            },
            user_agent: config.user_agent.clone(),
            max_body_bytes: MAX_RESPONSE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Fetch `url` with a single timed GET.
///
/// Non-2xx statuses map to [`FetchError::HttpStatus`], an elapsed timeout to
/// [`FetchError::Timeout`], and everything else on the wire to
/// [`FetchError::Transport`].
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &Url, opts: &FetchOptions) -> Result<RawDocument, FetchError> {
    let client = build_client(opts)?;

    debug!(timeout_secs = opts.timeout_secs, "sending request");

    let mut response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(map_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    if let Some(len) = response.content_length() {
        if len > opts.max_body_bytes {
            return Err(too_large(opts.max_body_bytes));
        }
    }

    let final_url = response.url().clone();

    // Chunked responses declare no length, so the cap is checked as bytes arrive.
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
        if (bytes.len() + chunk.len()) as u64 > opts.max_body_bytes {
            return Err(too_large(opts.max_body_bytes));
        }
        bytes.extend_from_slice(&chunk);
    }
    let body = String::from_utf8_lossy(&bytes).into_owned();

    info!(status = status.as_u16(), bytes = body.len(), "page fetched");

    Ok(RawDocument {
        url: final_url,
        status: status.as_u16(),
        body,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with the configured timeout and user agent.
fn build_client(opts: &FetchOptions) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(opts.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))
}

fn too_large(max: u64) -> FetchError {
    FetchError::Transport(format!("response too large (max {max} bytes)"))
}

/// Sort a reqwest error into the fetch error taxonomy.
fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    FetchError::Transport(error_chain(&err))
}

/// Render an error with its sources, e.g. `"error sending request: connection refused"`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
