//! Evalguard Safety - pre-flight screening of submitted fragments
//!
//! This crate scans JavaScript source text before it is executed:
//!
//! - a declarative **pattern library** of rules, each either blocking (issue)
//!   or advisory (warning)
//! - the **safety analyzer**, which evaluates every rule independently and
//!   builds a [`SafetyReport`](evalguard_core::SafetyReport)
//! - the **capability detector**, which reports references to host-only
//!   (browser) APIs
//! - rule loaders for extending the built-in library from TOML/JSON files
//!
//! All matchers are word-boundary and call/assignment-shape aware, so benign
//! identifiers such as `evaluation` or `fetchData` never trigger a rule.
//!
//! ## Usage
//!
//! ```rust
//! use evalguard_safety::SafetyAnalyzer;
//!
//! let report = SafetyAnalyzer::new().analyze("element.innerHTML = x");
//! assert!(report.safe);
//! assert_eq!(report.warnings.len(), 1);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::analyzer::{SafetyAnalyzer, analyze};
pub use domain::{HostApi, Pattern, PatternRule, RuleSeverity, SafetyFinding};
pub use infrastructure::capabilities::{CapabilityDetector, references_host_apis};
pub use infrastructure::rules::{
    BuiltinRuleLoader, CompositeRuleLoader, FileRuleLoader, RuleLoadError, RuleLoader,
};
