//! Test case and run report types
//!
//! Test cases arrive from the content layer as JSON values; results are
//! handed back as an immutable [`TestRunReport`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::safety::SafetyReport;

/// A single declared test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Positional arguments for the entry point
    pub input: Vec<Value>,
    pub expected_output: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TestCase {
    pub fn new(input: Vec<Value>, expected_output: Value) -> Self {
        Self {
            input,
            expected_output,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description shown in reports; `index` is zero-based
    pub fn display_description(&self, index: usize) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Test case {}", index + 1))
    }
}

/// Classification of one case's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    WrongAnswer,
    RuntimeError,
    TimedOut,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "passed",
            CaseStatus::WrongAnswer => "wrong_answer",
            CaseStatus::RuntimeError => "runtime_error",
            CaseStatus::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub description: String,
    pub passed: bool,
    pub status: CaseStatus,
    pub input: Vec<Value>,
    /// Value returned by the candidate; absent on fault or timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    pub expected: Value,
    /// Sanitized diagnostic for faults and timeouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Terminal artifact of a test run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunReport {
    pub run_id: Uuid,
    pub entry_point: String,
    /// True when the safety gate refused execution
    pub blocked: bool,
    pub total_count: usize,
    pub passed_count: usize,
    pub results: Vec<TestCaseResult>,
    pub safety_report: SafetyReport,
    pub completed_at: DateTime<Utc>,
}

impl TestRunReport {
    /// Report for a run refused by the safety gate
    pub fn blocked(entry_point: impl Into<String>, safety_report: SafetyReport) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            entry_point: entry_point.into(),
            blocked: true,
            total_count: 0,
            passed_count: 0,
            results: Vec::new(),
            safety_report,
            completed_at: Utc::now(),
        }
    }

    /// Aggregate per-case results into a report
    pub fn from_results(
        entry_point: impl Into<String>,
        results: Vec<TestCaseResult>,
        safety_report: SafetyReport,
    ) -> Self {
        let passed_count = results.iter().filter(|r| r.passed).count();
        Self {
            run_id: Uuid::new_v4(),
            entry_point: entry_point.into(),
            blocked: false,
            total_count: results.len(),
            passed_count,
            results,
            safety_report,
            completed_at: Utc::now(),
        }
    }

    pub fn all_passed(&self) -> bool {
        !self.blocked && self.passed_count == self.total_count
    }

    pub fn failed_count(&self) -> usize {
        self.total_count - self.passed_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(passed: bool) -> TestCaseResult {
        TestCaseResult {
            description: "case".to_string(),
            passed,
            status: if passed {
                CaseStatus::Passed
            } else {
                CaseStatus::WrongAnswer
            },
            input: vec![json!(1)],
            actual: Some(json!(2)),
            expected: json!(2),
            error: None,
            duration_ms: 3,
        }
    }

    #[test]
    fn test_case_deserializes_camel_case() {
        let case: TestCase = serde_json::from_value(json!({
            "input": [[2, 7, 11, 15], 9],
            "expectedOutput": [0, 1],
            "description": "basic"
        }))
        .expect("valid test case");

        assert_eq!(case.input.len(), 2);
        assert_eq!(case.expected_output, json!([0, 1]));
        assert_eq!(case.description.as_deref(), Some("basic"));
    }

    #[test]
    fn test_default_description_is_one_based() {
        let case = TestCase::new(vec![], json!(null));
        assert_eq!(case.display_description(0), "Test case 1");
        assert_eq!(
            case.with_description("edge").display_description(4),
            "edge"
        );
    }

    #[test]
    fn test_report_aggregation() {
        let report =
            TestRunReport::from_results("solve", vec![result(true), result(false)], SafetyReport::clean());
        assert_eq!(report.total_count, 2);
        assert_eq!(report.passed_count, 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
        assert!(!report.blocked);
    }

    #[test]
    fn test_blocked_report_is_empty() {
        let safety = SafetyReport::new(vec!["nope".to_string()], vec![]);
        let report = TestRunReport::blocked("solve", safety.clone());
        assert!(report.blocked);
        assert_eq!(report.total_count, 0);
        assert_eq!(report.passed_count, 0);
        assert!(report.results.is_empty());
        assert_eq!(report.safety_report, safety);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_case_status_serializes_snake_case() {
        let value = serde_json::to_value(CaseStatus::WrongAnswer).unwrap();
        assert_eq!(value, json!("wrong_answer"));
        assert_eq!(CaseStatus::TimedOut.to_string(), "timed_out");
    }
}
