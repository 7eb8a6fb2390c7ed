//! The seam between the runner and whatever executes candidates

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use evalguard_sandbox::ExecutionOutcome;

/// Executes one invocation of a candidate's entry point
///
/// Implementations must never fail: every problem is an
/// [`ExecutionOutcome`].
#[async_trait]
pub trait CandidateExecutor: Send + Sync {
    /// Budget used when the caller supplies none
    fn default_time_limit(&self) -> Duration;

    /// False when every invocation is bound to fault (e.g. no runtime installed)
    fn is_ready(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        fragment: &str,
        entry_point: &str,
        args: &[Value],
        time_limit: Duration,
    ) -> ExecutionOutcome;
}
