//! Safety report value object

use serde::{Deserialize, Serialize};

/// Outcome of screening a fragment against the pattern library
///
/// `safe` is true iff `issues` is empty; warnings never affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub safe: bool,
    /// Blocking findings, one message per violated rule
    pub issues: Vec<String>,
    /// Advisory findings, one message per matched rule
    pub warnings: Vec<String>,
}

impl SafetyReport {
    /// Build a report, deriving `safe` from the issue list
    pub fn new(issues: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            safe: issues.is_empty(),
            issues,
            warnings,
        }
    }

    /// A report with no findings at all
    pub fn clean() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
