//! Output module for batch summaries and reports
//!
//! This module handles:
//! - Aggregating page results into a batch summary
//! - Printing results to the console
//! - Writing Markdown and JSON reports

pub mod console;
mod json;
mod markdown;
mod summary;

pub use json::format_json_report;
pub use markdown::format_markdown_report;
pub use summary::{summarize, BatchSummary};

use crate::config::ReportFormat;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Run metadata shown alongside the results in a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub generated_at: DateTime<Utc>,
    pub base_url: String,

    /// SHA-256 of the configuration file, when one was used
    pub config_hash: Option<String>,

    /// The batch was interrupted and holds partial results
    pub cancelled: bool,
}

impl ReportContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            base_url: base_url.into(),
            config_hash: None,
            cancelled: false,
        }
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }
}

/// Formats a report in the requested format
pub fn format_report(
    summary: &BatchSummary,
    context: &ReportContext,
    format: ReportFormat,
) -> crate::Result<String> {
    match format {
        ReportFormat::Markdown => Ok(format_markdown_report(summary, context)),
        ReportFormat::Json => Ok(format_json_report(summary, context)?),
    }
}

/// Writes a report to `path`, replacing any existing file
pub fn render_report(
    summary: &BatchSummary,
    context: &ReportContext,
    format: ReportFormat,
    path: &Path,
) -> crate::Result<()> {
    let report = format_report(summary, context, format)?;
    std::fs::write(path, report)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}
