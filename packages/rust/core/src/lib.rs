//! Pipeline orchestration and reporting for the patch tracker.
//!
//! This crate ties together fetching, extraction, and classification into a
//! single scrape (`pipeline::run`) and builds the summary report.

pub mod pipeline;
pub mod report;
