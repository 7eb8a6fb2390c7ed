//! No-op sandbox implementation
//!
//! Installs no process restrictions. The worker still evaluates the fragment
//! inside its `vm` context and is still killed at the host deadline.

use tokio::process::Command;
use tracing::debug;

use crate::domain::policy::SandboxPolicy;
use crate::domain::traits::{SandboxBackend, SandboxResult};

#[derive(Debug, Default)]
pub struct NoOpSandbox;

impl NoOpSandbox {
    pub fn new() -> Self {
        Self
    }
}

impl SandboxBackend for NoOpSandbox {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn apply_restrictions(&self, _command: &mut Command, _policy: &SandboxPolicy) -> SandboxResult<()> {
        debug!("No-op sandbox: applying no restrictions");
        Ok(())
    }
}
