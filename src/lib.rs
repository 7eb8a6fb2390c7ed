//! Evalguard - safety screening, sandboxed execution and result comparison
//! for submitted JavaScript fragments
//!
//! This crate wires the workspace crates together:
//!
//! - `evalguard-core`: configuration, logging, report types, message sanitizer
//! - `evalguard-safety`: pattern library, safety analyzer, capability detector
//! - `evalguard-sandbox`: out-of-process executor with hard deadlines
//! - `evalguard-judge`: per-case runner and deep equality
//!
//! and provides the `evalguard` command-line tool.

mod app;
pub mod cli;

pub use app::{Evaluator, EvaluatorError};
pub use evalguard_core::{
    CaseStatus, Config, MessageSanitizer, SafetyReport, TestCase, TestCaseResult, TestRunReport,
    init_tracing, sanitize,
};
pub use evalguard_judge::{CandidateExecutor, TestRunner, deep_equal};
pub use evalguard_safety::{
    CapabilityDetector, HostApi, SafetyAnalyzer, SafetyFinding, analyze, references_host_apis,
};
pub use evalguard_sandbox::{ExecutionOutcome, SandboxExecutor};

// Re-export for convenience
pub use evalguard_core;
pub use evalguard_judge;
pub use evalguard_safety;
pub use evalguard_sandbox;
