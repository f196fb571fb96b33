//! Batch aggregation

use crate::checks::Classification;
use crate::crawler::PageResult;
use serde::Serialize;

/// Totals for one batch, derived from its page results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub success_count: usize,

    /// Pages that could not be fetched at all
    pub fetch_failure_count: usize,

    pub page_results: Vec<PageResult>,
}

impl BatchSummary {
    /// Number of check results with the given classification
    pub fn count(&self, classification: Classification) -> usize {
        match classification {
            Classification::Success => self.success_count,
            Classification::Info => self.info_count,
            Classification::Warning => self.warning_count,
            Classification::Error => self.error_count,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_results.len()
    }

    /// Total number of Error-classified check results; zero means no check failed
    ///
    /// Not clamped. Hosts with a narrow exit status must map large values
    /// themselves.
    pub fn exit_code(&self) -> usize {
        self.error_count
    }

    /// Check errors plus pages that could not be fetched
    pub fn failure_count(&self) -> usize {
        self.error_count + self.fetch_failure_count
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Page results ordered by path; pages with equal paths keep batch order
    pub fn sorted_by_path(&self) -> Vec<&PageResult> {
        let mut pages: Vec<&PageResult> = self.page_results.iter().collect();
        pages.sort_by(|a, b| a.path.cmp(&b.path));
        pages
    }
}

/// Folds page results into a summary
///
/// Every result is kept as-is. Summarizing a summary's own page results yields
/// an equal summary.
pub fn summarize(page_results: Vec<PageResult>) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for page in &page_results {
        if page.is_fetch_failure() {
            summary.fetch_failure_count += 1;
            continue;
        }
        for result in page.check_results() {
            match result.classification {
                Classification::Success => summary.success_count += 1,
                Classification::Info => summary.info_count += 1,
                Classification::Warning => summary.warning_count += 1,
                Classification::Error => summary.error_count += 1,
            }
        }
    }

    summary.page_results = page_results;
    summary
}
