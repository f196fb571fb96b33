//! Fetch-and-check pipeline for a single URL

use crate::checks::{CheckRegistry, CheckResult, Classification};
use crate::crawler::Fetcher;
use crate::sitemap::UrlRecord;
use serde::Serialize;
use std::sync::Arc;

/// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageOutcome {
    /// The page was fetched and every applicable check ran
    Checked {
        status_code: u16,
        check_results: Vec<CheckResult>,
    },

    /// The page could not be fetched at all
    FetchFailed { error: String },
}

/// Results for one URL from the sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    /// Request path
    pub path: String,

    pub outcome: PageOutcome,
}

impl PageResult {
    pub fn checked(
        path: impl Into<String>,
        status_code: u16,
        check_results: Vec<CheckResult>,
    ) -> Self {
        Self {
            path: path.into(),
            outcome: PageOutcome::Checked {
                status_code,
                check_results,
            },
        }
    }

    pub fn fetch_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outcome: PageOutcome::FetchFailed {
                error: error.into(),
            },
        }
    }

    /// HTTP status code, if the page was fetched
    pub fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            PageOutcome::Checked { status_code, .. } => Some(*status_code),
            PageOutcome::FetchFailed { .. } => None,
        }
    }

    /// Check results in registry order; empty when the fetch failed
    pub fn check_results(&self) -> &[CheckResult] {
        match &self.outcome {
            PageOutcome::Checked { check_results, .. } => check_results,
            PageOutcome::FetchFailed { .. } => &[],
        }
    }

    /// The fetch error, if the page could not be retrieved
    pub fn fetch_error(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::FetchFailed { error } => Some(error),
            PageOutcome::Checked { .. } => None,
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self.outcome, PageOutcome::FetchFailed { .. })
    }

    /// Most severe classification on the page
    pub fn worst_classification(&self) -> Option<Classification> {
        self.check_results()
            .iter()
            .map(|result| result.classification)
            .max()
    }
}

/// Called with each page result as soon as it is produced
pub type PageObserver = Arc<dyn Fn(&PageResult) + Send + Sync>;

/// Fetches one URL and runs the registry against the response
///
/// Cloning is cheap: the fetcher, registry and observer are shared read-only.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    registry: Arc<CheckRegistry>,
    strict: bool,
    observer: Option<PageObserver>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, registry: Arc<CheckRegistry>) -> Self {
        Self {
            fetcher,
            registry,
            strict: false,
            observer: None,
        }
    }

    /// Records panicking checks as errors instead of dropping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reports every page result to `observer` as it completes
    pub fn on_page(mut self, observer: impl Fn(&PageResult) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Hands a finished page to the observer, if any
    pub(crate) fn notify(&self, page: &PageResult) {
        if let Some(observer) = &self.observer {
            observer(page);
        }
    }

    /// Processes one URL record into a page result
    ///
    /// Never fails: an unresolvable location or a transport error becomes a
    /// `FetchFailed` outcome for this page only.
    pub async fn process(&self, record: &UrlRecord) -> PageResult {
        let result = self.check(record).await;
        self.notify(&result);
        result
    }

    async fn check(&self, record: &UrlRecord) -> PageResult {
        let path = match record.request_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Cannot resolve {}: {}", record.target_url, e);
                return PageResult::fetch_failed(record.target_url.clone(), e.to_string());
            }
        };

        let response = match self.fetcher.fetch(&path).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", path, e);
                return PageResult::fetch_failed(path, e.to_string());
            }
        };

        // Checks parse HTML synchronously, so keep them off the async workers
        let status_code = response.status_code;
        let registry = Arc::clone(&self.registry);
        let strict = self.strict;
        let check_results =
            match tokio::task::spawn_blocking(move || registry.run_all(&response, strict)).await {
                Ok(check_results) => check_results,
                Err(e) => {
                    tracing::error!("Check task failed for {}: {}", path, e);
                    return PageResult::fetch_failed(path, "check task failed");
                }
            };
        tracing::debug!(
            path = %path,
            status = status_code,
            results = check_results.len(),
            "page checked"
        );

        PageResult::checked(path, status_code, check_results)
    }
}
