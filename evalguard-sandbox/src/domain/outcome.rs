//! Result of a single sandboxed invocation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened when the entry point was invoked
///
/// Created once per invocation and consumed immediately by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Returned normally within budget
    Completed(Value),
    /// Threw, failed to compile, or the worker failed; carries a sanitized message
    Faulted(String),
    /// Did not return before the deadline
    TimedOut,
}

impl ExecutionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ExecutionOutcome::Completed(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            ExecutionOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }
}
