//! Evalguard Sandbox - isolated execution of candidate fragments
//!
//! Every invocation runs in a fresh JavaScript runtime process. The fragment is
//! evaluated inside a `vm` context with no access to `require`, `process` or
//! string code generation, its entry point is called with JSON arguments and
//! the return value comes back as JSON.
//!
//! # Deadlines
//!
//! Two deadlines guard each call:
//!
//! | Deadline | Enforced by | Catches |
//! |----------|-------------|---------|
//! | time limit | `vm` timeout inside the worker | synchronous loops |
//! | time limit + start-up grace | host, SIGKILL via `kill_on_drop` | everything else |
//!
//! The host deadline does not depend on the candidate cooperating, so a
//! runaway fragment can never stall the caller.
//!
//! # Backends
//!
//! | Platform | Backend | Restrictions |
//! |----------|---------|--------------|
//! | Linux | `process` | rlimits: no core dumps, CPU seconds, file size, open files |
//! | any | `noop` | none beyond the `vm` context |
//!
//! # Usage
//!
//! ```rust,ignore
//! use evalguard_sandbox::{ExecutionOutcome, SandboxExecutor};
//! use serde_json::json;
//!
//! let executor = SandboxExecutor::auto();
//! let outcome = executor
//!     .invoke("function add(a, b) { return a + b; }", "add", &[json!(1), json!(2)], None)
//!     .await;
//! assert_eq!(outcome, ExecutionOutcome::Completed(json!(3)));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::executor::{DEFAULT_RUNTIMES, SandboxExecutor, is_valid_entry_point};
pub use application::selector::SandboxSelector;
pub use domain::outcome::ExecutionOutcome;
pub use domain::policy::{SandboxPolicy, SandboxPolicyBuilder};
pub use domain::traits::{SandboxBackend, SandboxError, SandboxResult};

#[cfg(target_os = "linux")]
pub use infrastructure::process::ProcessSandbox;

pub use infrastructure::noop::NoOpSandbox;
