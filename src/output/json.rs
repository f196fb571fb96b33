//! JSON report generation

use crate::output::{BatchSummary, ReportContext};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    context: &'a ReportContext,
    summary: &'a BatchSummary,
}

/// Serializes the run context and summary as pretty-printed JSON
pub fn format_json_report(
    summary: &BatchSummary,
    context: &ReportContext,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { context, summary })
}
