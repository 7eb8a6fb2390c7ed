//! Safety findings

use serde::{Deserialize, Serialize};

use super::rule::RuleSeverity;

/// A matched rule, located at its first occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFinding {
    pub rule_id: String,
    pub severity: RuleSeverity,
    pub message: String,
    /// 1-based line of the first occurrence
    pub line: u32,
}

impl SafetyFinding {
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }
}
