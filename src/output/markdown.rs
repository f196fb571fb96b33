//! Markdown report generation
//!
//! The report lists run information, totals, a per-check breakdown and every
//! page's results in path order.

use crate::checks::Classification;
use crate::crawler::PageResult;
use crate::output::{BatchSummary, ReportContext};

/// Formats a batch summary as markdown
///
/// # Arguments
///
/// * `summary` - The aggregated batch results
/// * `context` - Run metadata shown in the header
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(summary: &BatchSummary, context: &ReportContext) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Sitemap Check Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        context.generated_at.to_rfc3339()
    ));
    md.push_str(&format!("- **Base URL**: {}\n", context.base_url));
    if let Some(hash) = &context.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    let status = if context.cancelled {
        "Interrupted (partial results)"
    } else {
        "Complete"
    };
    md.push_str(&format!("- **Status**: {}\n\n", status));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Checked**: {}\n", summary.page_count()));
    md.push_str(&format!("- **Errors**: {}\n", summary.error_count));
    md.push_str(&format!("- **Warnings**: {}\n", summary.warning_count));
    md.push_str(&format!("- **Info**: {}\n", summary.info_count));
    md.push_str(&format!("- **Successes**: {}\n", summary.success_count));
    md.push_str(&format!(
        "- **Fetch Failures**: {}\n\n",
        summary.fetch_failure_count
    ));

    // Per-check breakdown
    let breakdown = check_breakdown(summary);
    if !breakdown.is_empty() {
        md.push_str("## Results by Check\n\n");
        md.push_str("| Check | Success | Info | Warning | Error |\n");
        md.push_str("|-------|---------|------|---------|-------|\n");
        for (name, counts) in &breakdown {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                escape_cell(name),
                counts[0],
                counts[1],
                counts[2],
                counts[3]
            ));
        }
        md.push('\n');
    }

    // Pages
    if !summary.page_results.is_empty() {
        md.push_str("## Pages\n\n");
        for page in summary.sorted_by_path() {
            format_page(&mut md, page);
        }
    }

    md
}

fn format_page(md: &mut String, page: &PageResult) {
    match page.status_code() {
        Some(status) => md.push_str(&format!("### {} (HTTP {})\n\n", page.path, status)),
        None => md.push_str(&format!("### {} (fetch failed)\n\n", page.path)),
    }

    if let Some(error) = page.fetch_error() {
        md.push_str(&format!("> {}\n\n", error));
        return;
    }

    if page.check_results().is_empty() {
        md.push_str("No checks applied.\n\n");
        return;
    }

    md.push_str("| Check | Result | Message |\n");
    md.push_str("|-------|--------|---------|\n");
    for result in page.check_results() {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&result.check_name),
            result.classification.label(),
            escape_cell(&result.message)
        ));
    }
    md.push('\n');
}

/// Counts per check name, indexed by classification, in first-seen order
fn check_breakdown(summary: &BatchSummary) -> Vec<(String, [usize; 4])> {
    let mut rows: Vec<(String, [usize; 4])> = Vec::new();

    for result in summary.page_results.iter().flat_map(|p| p.check_results()) {
        let column = match result.classification {
            Classification::Success => 0,
            Classification::Info => 1,
            Classification::Warning => 2,
            Classification::Error => 3,
        };
        match rows.iter_mut().find(|(name, _)| *name == result.check_name) {
            Some((_, counts)) => counts[column] += 1,
            None => {
                let mut counts = [0; 4];
                counts[column] = 1;
                rows.push((result.check_name.clone(), counts));
            }
        }
    }

    rows
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
