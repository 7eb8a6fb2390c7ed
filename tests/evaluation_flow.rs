//! Evaluator facade: screening, gating, running and comparing

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use evalguard::{
    CandidateExecutor, CaseStatus, Evaluator, ExecutionOutcome, HostApi, TestCase,
};
use serde_json::{Value, json};

/// Sums numeric arguments, faults on strings, times out on `null`
struct ArithmeticExecutor {
    calls: AtomicUsize,
}

impl ArithmeticExecutor {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CandidateExecutor for ArithmeticExecutor {
    fn default_time_limit(&self) -> Duration {
        Duration::from_millis(750)
    }

    async fn execute(
        &self,
        _fragment: &str,
        _entry_point: &str,
        args: &[Value],
        _time_limit: Duration,
    ) -> ExecutionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if args.iter().any(Value::is_null) {
            return ExecutionOutcome::TimedOut;
        }
        if args.iter().any(Value::is_string) {
            return ExecutionOutcome::Faulted("TypeError: not a number".to_string());
        }
        let sum: i64 = args.iter().filter_map(Value::as_i64).sum();
        ExecutionOutcome::Completed(json!(sum))
    }
}

const ADD: &str = "function add(a, b) { return a + b; }";

#[tokio::test]
async fn test_all_cases_pass() {
    let executor = ArithmeticExecutor::new();
    let evaluator = Evaluator::with_executor(executor.clone());
    let cases = vec![
        TestCase::new(vec![json!(1), json!(2)], json!(3)),
        TestCase::new(vec![json!(-4), json!(4)], json!(0)).with_description("cancels out"),
    ];

    let report = evaluator.evaluate(ADD, "add", &cases, None).await;

    assert!(!report.blocked);
    assert!(report.all_passed());
    assert_eq!(report.total_count, 2);
    assert_eq!(report.results[0].description, "Test case 1");
    assert_eq!(report.results[1].description, "cancels out");
    assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_mixed_outcomes_are_classified_per_case() {
    let evaluator = Evaluator::with_executor(ArithmeticExecutor::new());
    let cases = vec![
        TestCase::new(vec![json!(1), json!(1)], json!(3)),
        TestCase::new(vec![json!("x")], json!(0)),
        TestCase::new(vec![Value::Null], json!(0)),
        TestCase::new(vec![json!(2)], json!(2.0)),
    ];

    let report = evaluator.evaluate(ADD, "add", &cases, None).await;

    let statuses: Vec<CaseStatus> = report.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            CaseStatus::WrongAnswer,
            CaseStatus::RuntimeError,
            CaseStatus::TimedOut,
            CaseStatus::Passed,
        ]
    );
    assert_eq!(report.passed_count, 1);
    assert_eq!(report.failed_count(), 3);
    assert_eq!(report.results[0].actual, Some(json!(2)));
    assert_eq!(
        report.results[1].error.as_deref(),
        Some("TypeError: not a number")
    );
    assert_eq!(
        report.results[2].error.as_deref(),
        Some("Execution timed out after 750ms")
    );
}

#[tokio::test]
async fn test_time_limit_override_is_reported() {
    let evaluator = Evaluator::with_executor(ArithmeticExecutor::new());
    let cases = vec![TestCase::new(vec![Value::Null], json!(0))];

    let report = evaluator
        .evaluate(ADD, "add", &cases, Some(Duration::from_millis(120)))
        .await;

    assert_eq!(
        report.results[0].error.as_deref(),
        Some("Execution timed out after 120ms")
    );
}

#[tokio::test]
async fn test_unsafe_fragment_never_reaches_executor() {
    let executor = ArithmeticExecutor::new();
    let evaluator = Evaluator::with_executor(executor.clone());
    let cases = vec![TestCase::new(vec![json!(1)], json!(1))];

    let report = evaluator
        .evaluate("function add(s) { return eval(s); }", "add", &cases, None)
        .await;

    assert!(report.blocked);
    assert!(!report.safety_report.safe);
    assert!(report.results.is_empty());
    assert!(!report.all_passed());
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_warnings_do_not_block() {
    let evaluator = Evaluator::with_executor(ArithmeticExecutor::new());
    let fragment = "function add(a, b) { const big = new Array(1000000); return a + b; }";
    let cases = vec![TestCase::new(vec![json!(2), json!(3)], json!(5))];

    let report = evaluator.evaluate(fragment, "add", &cases, None).await;

    assert!(!report.blocked);
    assert!(report.safety_report.has_warnings());
    assert!(report.all_passed());
}

#[tokio::test]
async fn test_empty_case_list_is_vacuously_passing() {
    let evaluator = Evaluator::with_executor(ArithmeticExecutor::new());

    let report = evaluator.evaluate(ADD, "add", &[], None).await;

    assert_eq!(report.total_count, 0);
    assert!(report.all_passed());
}

#[test]
fn test_screening_helpers() {
    let evaluator = Evaluator::with_executor(ArithmeticExecutor::new());

    assert!(evaluator.analyze(ADD).safe);
    assert!(evaluator.findings(ADD).is_empty());
    assert_eq!(
        evaluator.capabilities("function go() { window.scrollTo(0, 0); }"),
        vec![HostApi::Window]
    );
    assert!(!evaluator.references_host_apis(ADD));
    assert_eq!(
        evaluator.sanitize("at /srv/app/solution.js:3"),
        "at [path]:3"
    );
    assert_eq!(evaluator.default_time_limit(), Duration::from_millis(750));
}

#[tokio::test]
async fn test_real_runtime_when_available() {
    let evaluator = Evaluator::new();
    if !evaluator.is_executor_ready() {
        eprintln!("skipping: no JavaScript runtime on PATH");
        return;
    }
    let cases = vec![
        TestCase::new(vec![json!(1), json!(2)], json!(3)),
        TestCase::new(vec![json!([1]), json!([2])], json!("12")),
    ];

    let report = evaluator.evaluate(ADD, "add", &cases, None).await;

    assert!(report.all_passed(), "{:?}", report.results);
}
