//! Ordered check registry and the runner that applies it

use crate::checks::builtin::builtin_checks;
use crate::checks::{CheckResult, Classification, FetchedResponse};
use crate::ConfigError;
use std::any::Any;
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Signature every check implements
///
/// Returns `None` only when the check cannot apply to the response at all.
pub type CheckFn = fn(&FetchedResponse) -> Option<CheckResult>;

/// A named check
#[derive(Debug, Clone, Copy)]
pub struct Check {
    /// Stable identifier used in configuration
    pub id: &'static str,

    /// Display name carried by every result this check produces
    pub name: &'static str,

    /// The check itself
    pub run: CheckFn,
}

impl Check {
    pub const fn new(id: &'static str, name: &'static str, run: CheckFn) -> Self {
        Self { id, name, run }
    }
}

/// Fixed, ordered list of checks applied to every response
///
/// Identifiers and names are unique, so a page never carries two results for
/// the same check.
#[derive(Debug, Clone)]
pub struct CheckRegistry {
    checks: Vec<Check>,
}

impl CheckRegistry {
    /// Every built-in check in canonical order
    pub fn builtin() -> Self {
        Self {
            checks: builtin_checks(),
        }
    }

    /// Builds a registry from configured identifiers, keeping their order
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError::UnknownCheck)` - An identifier names no built-in check
    /// * `Err(ConfigError::DuplicateCheck)` - An identifier appears twice
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Result<Self, ConfigError> {
        let available = builtin_checks();
        let mut checks = Vec::with_capacity(ids.len());

        for id in ids {
            let id = id.as_ref();
            let check = available
                .iter()
                .find(|check| check.id == id)
                .ok_or_else(|| ConfigError::UnknownCheck(id.to_string()))?;
            checks.push(*check);
        }

        Self::from_checks(checks)
    }

    /// Builds a registry from host-supplied checks
    pub fn from_checks(checks: Vec<Check>) -> Result<Self, ConfigError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for check in &checks {
            if !ids.insert(check.id) {
                return Err(ConfigError::DuplicateCheck(check.id.to_string()));
            }
            if !names.insert(check.name) {
                return Err(ConfigError::DuplicateCheck(check.name.to_string()));
            }
        }

        Ok(Self { checks })
    }

    /// Identifiers in registry order
    pub fn ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs every check against a response, in registry order
    ///
    /// A check that panics is contained to its own slot. In lenient mode
    /// nothing is recorded for it; in strict mode it is recorded as an
    /// `Error` result so the fault shows up in the report and exit code.
    pub fn run_all(&self, response: &FetchedResponse, strict: bool) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            match catch_unwind(AssertUnwindSafe(|| (check.run)(response))) {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {
                    tracing::trace!(check = check.id, path = %response.path, "check not applicable");
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::error!(
                        check = check.id,
                        path = %response.path,
                        "check panicked: {}",
                        message
                    );
                    if strict {
                        results.push(CheckResult::new(
                            check.name,
                            Classification::Error,
                            format!("Check failed to run: {}", message),
                        ));
                    }
                }
            }
        }

        results
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
