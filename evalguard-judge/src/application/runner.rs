//! Test run use case
//!
//! A run moves through three phases:
//!
//! - **Gated**: an unsafe fragment goes straight to a blocked report; the
//!   executor is never called.
//! - **Running**: cases execute one at a time in declared order. A fault or
//!   timeout fails that case only.
//! - **Done**: results are aggregated into an immutable report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use evalguard_core::{CaseStatus, SafetyReport, TestCase, TestCaseResult, TestRunReport};
use evalguard_sandbox::ExecutionOutcome;

use crate::domain::comparator::deep_equal;
use crate::domain::executor::CandidateExecutor;

/// Drives a candidate through its test cases
pub struct TestRunner {
    executor: Arc<dyn CandidateExecutor>,
    time_limit: Option<Duration>,
}

impl TestRunner {
    pub fn new(executor: Arc<dyn CandidateExecutor>) -> Self {
        Self {
            executor,
            time_limit: None,
        }
    }

    /// Override the executor's per-case budget
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Per-case budget in effect
    pub fn time_limit(&self) -> Duration {
        self.time_limit
            .unwrap_or_else(|| self.executor.default_time_limit())
    }

    #[instrument(skip_all, fields(entry = %entry_point, cases = cases.len()))]
    pub async fn run(
        &self,
        fragment: &str,
        entry_point: &str,
        cases: &[TestCase],
        safety_report: &SafetyReport,
    ) -> TestRunReport {
        if !safety_report.safe {
            warn!(
                issues = safety_report.issues.len(),
                "Fragment blocked by safety gate; no cases executed"
            );
            return TestRunReport::blocked(entry_point, safety_report.clone());
        }

        let time_limit = self.time_limit();
        let mut results = Vec::with_capacity(cases.len());
        for (index, case) in cases.iter().enumerate() {
            let result = self
                .run_case(fragment, entry_point, index, case, time_limit)
                .await;
            debug!(case = index + 1, status = %result.status, "Case finished");
            results.push(result);
        }

        let report = TestRunReport::from_results(entry_point, results, safety_report.clone());
        info!(
            passed = report.passed_count,
            total = report.total_count,
            "Test run complete"
        );
        report
    }

    async fn run_case(
        &self,
        fragment: &str,
        entry_point: &str,
        index: usize,
        case: &TestCase,
        time_limit: Duration,
    ) -> TestCaseResult {
        let start = Instant::now();
        let outcome = self
            .executor
            .execute(fragment, entry_point, &case.input, time_limit)
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let (status, actual, error) = match outcome {
            ExecutionOutcome::Completed(value) => {
                let status = if deep_equal(&value, &case.expected_output) {
                    CaseStatus::Passed
                } else {
                    CaseStatus::WrongAnswer
                };
                (status, Some(value), None)
            }
            ExecutionOutcome::Faulted(message) => (CaseStatus::RuntimeError, None, Some(message)),
            ExecutionOutcome::TimedOut => (
                CaseStatus::TimedOut,
                None,
                Some(format!(
                    "Execution timed out after {}ms",
                    time_limit.as_millis()
                )),
            ),
        };

        TestCaseResult {
            description: case.display_description(index),
            passed: status == CaseStatus::Passed,
            status,
            input: case.input.clone(),
            actual,
            expected: case.expected_output.clone(),
            error,
            duration_ms,
        }
    }
}
