//! Application setup and wiring
//!
//! [`Evaluator`] bundles the safety analyzer, capability detector, message
//! sanitizer and the sandboxed test runner behind one handle.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument};

use evalguard_core::config::Config;
use evalguard_core::{MessageSanitizer, SafetyReport, SanitizedMessage, TestCase, TestRunReport};
use evalguard_judge::{CandidateExecutor, TestRunner};
use evalguard_safety::{
    CapabilityDetector, HostApi, RuleLoadError, SafetyAnalyzer, SafetyFinding,
};
use evalguard_sandbox::{SandboxError, SandboxExecutor};

/// Errors raised while wiring an [`Evaluator`] from configuration
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Failed to load safety rules: {0}")]
    Rules(#[from] RuleLoadError),

    #[error("Failed to configure sandbox: {0}")]
    Sandbox(#[from] SandboxError),
}

/// Safety screening, sandboxed execution and comparison in one place
///
/// # Example
///
/// ```rust,ignore
/// use evalguard::{Evaluator, TestCase};
/// use serde_json::json;
///
/// let evaluator = Evaluator::new();
/// let report = evaluator
///     .evaluate(
///         "function add(a, b) { return a + b; }",
///         "add",
///         &[TestCase::new(vec![json!(1), json!(2)], json!(3))],
///         None,
///     )
///     .await;
/// assert!(report.all_passed());
/// ```
pub struct Evaluator {
    analyzer: Arc<SafetyAnalyzer>,
    detector: CapabilityDetector,
    sanitizer: MessageSanitizer,
    executor: Arc<dyn CandidateExecutor>,
}

impl Evaluator {
    /// Built-in rules, automatic sandbox backend, default limits
    pub fn new() -> Self {
        Self::with_executor(Arc::new(SandboxExecutor::auto()))
    }

    /// Built-in rules with a caller-supplied executor
    pub fn with_executor(executor: Arc<dyn CandidateExecutor>) -> Self {
        Self {
            analyzer: Arc::new(SafetyAnalyzer::new()),
            detector: CapabilityDetector::new(),
            sanitizer: MessageSanitizer::default(),
            executor,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, EvaluatorError> {
        let analyzer = SafetyAnalyzer::from_config(&config.analysis)?;
        let sanitizer = MessageSanitizer::new(config.diagnostics.max_message_length);
        let executor = SandboxExecutor::from_config(&config.sandbox)?.with_sanitizer(sanitizer);

        debug!(
            rules = analyzer.rule_count(),
            backend = executor.backend_name(),
            runtime = executor.is_runtime_available(),
            "Evaluator configured"
        );

        Ok(Self {
            analyzer: Arc::new(analyzer),
            detector: CapabilityDetector::new(),
            sanitizer,
            executor: Arc::new(executor),
        })
    }

    pub fn analyze(&self, fragment: &str) -> SafetyReport {
        self.analyzer.analyze(fragment)
    }

    /// Matched rules with rule ids and line numbers
    pub fn findings(&self, fragment: &str) -> Vec<SafetyFinding> {
        self.analyzer.findings(fragment)
    }

    pub fn capabilities(&self, fragment: &str) -> Vec<HostApi> {
        self.detector.detect(fragment)
    }

    pub fn references_host_apis(&self, fragment: &str) -> bool {
        self.detector.requires_host(fragment)
    }

    pub fn sanitize(&self, message: &str) -> String {
        self.sanitizer.sanitize(message)
    }

    /// Like [`Evaluator::sanitize`], also reporting how many paths were redacted
    pub fn sanitize_with_count(&self, message: &str) -> SanitizedMessage {
        self.sanitizer.sanitize_with_count(message)
    }

    /// Whether the executor can run candidates at all
    pub fn is_executor_ready(&self) -> bool {
        self.executor.is_ready()
    }

    pub fn default_time_limit(&self) -> Duration {
        self.executor.default_time_limit()
    }

    /// Analyze, gate and run every case
    ///
    /// `time_limit` overrides the executor's per-case budget.
    #[instrument(skip(self, fragment, cases), fields(cases = cases.len()))]
    pub async fn evaluate(
        &self,
        fragment: &str,
        entry_point: &str,
        cases: &[TestCase],
        time_limit: Option<Duration>,
    ) -> TestRunReport {
        let safety_report = self.analyze(fragment);
        debug!(safe = safety_report.safe, "Pre-flight analysis done");

        let mut runner = TestRunner::new(Arc::clone(&self.executor));
        if let Some(limit) = time_limit {
            runner = runner.with_time_limit(limit);
        }
        runner.run(fragment, entry_point, cases, &safety_report).await
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
