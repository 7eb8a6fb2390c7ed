//! Evalguard Judge - the test comparator
//!
//! Runs a candidate once per declared test case through a
//! [`CandidateExecutor`], compares each returned value with the expected one
//! by deep structural equality and aggregates a
//! [`TestRunReport`](evalguard_core::TestRunReport).
//!
//! A run that the safety gate refused never reaches the executor.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::runner::TestRunner;
pub use domain::comparator::deep_equal;
pub use domain::executor::CandidateExecutor;
