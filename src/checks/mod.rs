//! Per-response checks and their classified results
//!
//! This module contains:
//! - The response model handed to every check
//! - The severity scale and result type checks produce
//! - The ordered check registry and its runner
//! - The built-in SEO, metadata and security-header checks

mod builtin;
mod registry;
mod response;

pub use builtin::{builtin_checks, BUILTIN_CHECK_IDS};
pub use registry::{Check, CheckFn, CheckRegistry};
pub use response::FetchedResponse;

use serde::Serialize;
use std::fmt;

/// Severity of a check result
///
/// Variants are declared in increasing order of severity, so the derived
/// ordering lets "worst classification wins" be a plain `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Success,
    Info,
    Warning,
    Error,
}

impl Classification {
    /// All classifications, least severe first
    pub const ALL: [Classification; 4] = [
        Classification::Success,
        Classification::Info,
        Classification::Warning,
        Classification::Error,
    ];

    /// Human-readable label used by reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of running one check against one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Display name of the check that produced this result
    pub check_name: String,

    /// Severity
    pub classification: Classification,

    /// Human-readable detail, possibly quoting the page
    pub message: String,
}

impl CheckResult {
    pub fn new(
        check_name: impl Into<String>,
        classification: Classification,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            classification,
            message: message.into(),
        }
    }
}
