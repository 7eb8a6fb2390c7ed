//! Process sandbox using resource limits
//!
//! The limits are installed in the forked child right before `exec`, so they
//! bind the worker and never the evaluator. Address-space limits are not used:
//! V8 reserves large virtual ranges up front and refuses to start under them.
//! Heap size is bounded by `--max-old-space-size` instead.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use nix::sys::resource::{Resource, getrlimit, setrlimit};
use nix::sys::signal::Signal;
use tokio::process::Command;
use tracing::debug;

use crate::domain::policy::SandboxPolicy;
use crate::domain::traits::{SandboxBackend, SandboxResult};

/// Resource limits for one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerLimits {
    pub cpu_seconds: u64,
    pub file_size_bytes: u64,
    pub open_files: u64,
}

impl WorkerLimits {
    pub fn for_call(policy: &SandboxPolicy) -> Self {
        Self {
            cpu_seconds: policy.cpu_seconds(policy.time_limit),
            file_size_bytes: policy.max_output_bytes as u64,
            open_files: policy.max_open_files,
        }
    }

    /// `(resource, soft, hard)` triples
    ///
    /// The CPU hard limit sits one second above the soft limit: the kernel
    /// sends SIGXCPU at the soft limit but SIGKILL at the hard one.
    fn entries(&self) -> [(Resource, u64, u64); 4] {
        [
            (Resource::RLIMIT_CORE, 0, 0),
            (
                Resource::RLIMIT_CPU,
                self.cpu_seconds,
                self.cpu_seconds.saturating_add(1),
            ),
            (
                Resource::RLIMIT_FSIZE,
                self.file_size_bytes,
                self.file_size_bytes,
            ),
            (Resource::RLIMIT_NOFILE, self.open_files, self.open_files),
        ]
    }

    /// Apply to the calling process; each limit is clamped to the current hard limit
    pub fn apply(&self) -> nix::Result<()> {
        for (resource, soft, hard) in self.entries() {
            let (_, current_hard) = getrlimit(resource)?;
            setrlimit(resource, soft.min(current_hard), hard.min(current_hard))?;
        }
        Ok(())
    }
}

/// True if the worker was killed for exceeding its CPU-seconds limit
pub fn exceeded_cpu_limit(status: &ExitStatus) -> bool {
    status.signal() == Some(Signal::SIGXCPU as i32)
}

/// Process-based sandbox using resource limits
#[derive(Debug, Default)]
pub struct ProcessSandbox;

impl ProcessSandbox {
    pub fn new() -> Self {
        Self
    }
}

impl SandboxBackend for ProcessSandbox {
    fn name(&self) -> &'static str {
        "process"
    }

    fn is_available(&self) -> bool {
        cfg!(unix)
    }

    fn apply_restrictions(&self, command: &mut Command, policy: &SandboxPolicy) -> SandboxResult<()> {
        let limits = WorkerLimits::for_call(policy);
        debug!(?limits, "Installing worker resource limits");

        // SAFETY: the hook runs between fork and exec and only issues the
        // getrlimit/setrlimit syscalls, which are async-signal-safe.
        unsafe {
            command.pre_exec(move || limits.apply().map_err(std::io::Error::from));
        }
        Ok(())
    }
}
