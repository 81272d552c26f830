//! Shared types, error model, and configuration for the patch tracker.
//!
//! This crate is the foundation depended on by all other patch tracker crates.
//! It provides:
//! - [`PatchTrackerError`] and [`FetchError`], the error taxonomy
//! - Domain types ([`PatchEntry`], [`SubjectSection`], [`ChangeLine`])
//! - Configuration ([`ScrapeConfig`], [`FetchConfig`], [`LayoutConfig`])

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ARCHIVE_BASE_URL, DEFAULT_URL, FetchConfig, LayoutConfig, ScrapeConfig, archive_url,
    load_config_from,
};
pub use error::{FetchError, PatchTrackerError, Result};
pub use types::{ChangeLine, PatchEntry, SubjectSection};
