//! Sandbox traits and error types

use thiserror::Error;
use tokio::process::Command;

use super::policy::SandboxPolicy;

/// Result type for sandbox operations
pub type SandboxResult<T> = Result<T, SandboxError>;

/// Failures inside the executor
///
/// These never reach callers of `invoke`; they are folded into
/// `ExecutionOutcome::Faulted`.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Backend or runtime not usable on this system
    #[error("Sandbox not supported: {0}")]
    NotSupported(String),

    /// No JavaScript runtime found
    #[error("JavaScript runtime not available (install node or set sandbox.runtime_path)")]
    RuntimeUnavailable,

    /// Failed to spawn or configure the worker
    #[error("Failed to create sandbox: {0}")]
    CreationFailed(String),

    #[error("Invalid entry point name: '{0}'")]
    InvalidEntryPoint(String),

    /// Worker wrote more than the policy allows
    #[error("Output limit exceeded: more than {limit} bytes")]
    OutputLimitExceeded { limit: usize },

    /// Worker exited without a well-formed response
    #[error("Worker protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Restrictions applied to the worker process
///
/// Backends configure the command before it is spawned; anything they install
/// runs in the child, never in the evaluator itself.
pub trait SandboxBackend: Send + Sync {
    /// Backend name for logging/debugging
    fn name(&self) -> &'static str;

    /// Whether this backend works on the current system
    fn is_available(&self) -> bool;

    fn apply_restrictions(&self, command: &mut Command, policy: &SandboxPolicy)
    -> SandboxResult<()>;
}
