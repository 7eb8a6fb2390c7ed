//! [`CandidateExecutor`] backed by the sandboxed worker executor

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use evalguard_sandbox::{ExecutionOutcome, SandboxExecutor};

use crate::domain::executor::CandidateExecutor;

#[async_trait]
impl CandidateExecutor for SandboxExecutor {
    fn default_time_limit(&self) -> Duration {
        self.policy().time_limit
    }

    fn is_ready(&self) -> bool {
        self.is_runtime_available()
    }

    async fn execute(
        &self,
        fragment: &str,
        entry_point: &str,
        args: &[Value],
        time_limit: Duration,
    ) -> ExecutionOutcome {
        self.invoke(fragment, entry_point, args, Some(time_limit)).await
    }
}
