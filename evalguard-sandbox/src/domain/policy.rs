//! Sandbox policy value objects

use std::time::Duration;

use evalguard_core::config::SandboxConfig;

/// Limits applied to every invocation
///
/// # Example
///
/// ```rust
/// use evalguard_sandbox::SandboxPolicy;
/// use std::time::Duration;
///
/// let policy = SandboxPolicy::builder()
///     .time_limit_ms(2_000)
///     .max_heap_mb(128)
///     .build();
/// assert_eq!(policy.hard_deadline(policy.time_limit), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxPolicy {
    /// Default per-call budget when the caller gives none
    pub time_limit: Duration,
    /// Extra wall-clock allowance for runtime start-up before the hard kill
    pub startup_grace: Duration,
    /// V8 old-space limit for the worker
    pub max_heap_mb: u64,
    /// Maximum bytes accepted on the worker's stdout
    pub max_output_bytes: usize,
    /// Maximum descriptors the worker may hold open
    pub max_open_files: u64,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(5),
            startup_grace: Duration::from_secs(2),
            max_heap_mb: 256,
            max_output_bytes: 1024 * 1024, // 1MB
            max_open_files: 256,
        }
    }
}

impl SandboxPolicy {
    pub fn builder() -> SandboxPolicyBuilder {
        SandboxPolicyBuilder::new()
    }

    pub fn from_config(config: &SandboxConfig) -> Self {
        Self {
            time_limit: config.timeout(),
            startup_grace: config.startup_grace(),
            max_heap_mb: config.max_heap_mb,
            max_output_bytes: config.max_output_bytes,
            ..Self::default()
        }
    }

    /// Wall-clock point at which the host kills the worker
    pub fn hard_deadline(&self, time_limit: Duration) -> Duration {
        time_limit + self.startup_grace
    }

    /// CPU-seconds cap for a call with the given budget
    pub fn cpu_seconds(&self, time_limit: Duration) -> u64 {
        self.hard_deadline(time_limit).as_secs_f64().ceil() as u64 + 1
    }

    /// Set the default budget (chainable)
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// Builder for constructing sandbox policies fluently
#[derive(Debug, Default)]
pub struct SandboxPolicyBuilder {
    policy: SandboxPolicy,
}

impl SandboxPolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_limit(mut self, time_limit: Duration) -> Self {
        self.policy.time_limit = time_limit;
        self
    }

    pub fn time_limit_ms(mut self, ms: u64) -> Self {
        self.policy.time_limit = Duration::from_millis(ms);
        self
    }

    pub fn startup_grace(mut self, grace: Duration) -> Self {
        self.policy.startup_grace = grace;
        self
    }

    pub fn max_heap_mb(mut self, mb: u64) -> Self {
        self.policy.max_heap_mb = mb;
        self
    }

    pub fn max_output_bytes(mut self, bytes: usize) -> Self {
        self.policy.max_output_bytes = bytes;
        self
    }

    pub fn max_open_files(mut self, count: u64) -> Self {
        self.policy.max_open_files = count;
        self
    }

    pub fn build(self) -> SandboxPolicy {
        self.policy
    }
}
