//! Sandbox executor use case
//!
//! Runs a candidate fragment's entry point in a separate JavaScript runtime
//! process and turns whatever happens into an [`ExecutionOutcome`].
//!
//! # Protocol
//!
//! The executor spawns the runtime with an embedded harness script. The
//! harness:
//!
//! 1. Reads one JSON request (`source`, `entry`, `args`, `timeoutMs`) from stdin
//! 2. Evaluates the fragment in an isolated `vm` context and calls the entry point
//! 3. Writes one JSON line (`completed`, `faulted` or `timed_out`) to stdout
//!
//! The host stops listening as soon as the response line arrives and kills
//! the worker when the hard deadline passes.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, instrument, warn};

use evalguard_core::MessageSanitizer;
use evalguard_core::config::SandboxConfig;

use crate::application::selector::SandboxSelector;
use crate::domain::outcome::ExecutionOutcome;
use crate::domain::policy::SandboxPolicy;
use crate::domain::traits::{SandboxBackend, SandboxError, SandboxResult};

/// Runtime binaries looked up on `PATH`, in order
pub const DEFAULT_RUNTIMES: [&str; 2] = ["node", "nodejs"];

const HARNESS: &str = include_str!("../../runtime/harness.js");

const STDERR_CAPTURE_BYTES: u64 = 64 * 1024;

static ENTRY_POINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

/// True if `name` can be used as an entry point
pub fn is_valid_entry_point(name: &str) -> bool {
    ENTRY_POINT.is_match(name)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkerRequest<'a> {
    source: &'a str,
    entry: &'a str,
    args: &'a [Value],
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum WorkerResponse {
    Completed {
        #[serde(default)]
        value: Value,
    },
    Faulted {
        message: String,
    },
    TimedOut,
}

/// What the worker left behind
enum WorkerReply {
    Line(Vec<u8>),
    Exited { status: ExitStatus, stderr: Vec<u8> },
}

/// Executes candidate fragments in isolated worker processes
///
/// Each call spawns a fresh worker; nothing survives between calls.
///
/// # Example
///
/// ```rust,ignore
/// use evalguard_sandbox::SandboxExecutor;
/// use serde_json::json;
/// use std::time::Duration;
///
/// let executor = SandboxExecutor::auto();
/// let outcome = executor
///     .invoke("function twice(x) { return x * 2; }", "twice", &[json!(21)], Some(Duration::from_secs(1)))
///     .await;
/// ```
pub struct SandboxExecutor {
    backend: Arc<dyn SandboxBackend>,
    policy: SandboxPolicy,
    runtime_path: Option<PathBuf>,
    sanitizer: MessageSanitizer,
}

impl SandboxExecutor {
    /// Create an executor; the runtime is discovered on `PATH`
    pub fn new(backend: Arc<dyn SandboxBackend>, policy: SandboxPolicy) -> Self {
        Self {
            backend,
            policy,
            runtime_path: Self::discover_runtime(),
            sanitizer: MessageSanitizer::default(),
        }
    }

    /// Create an executor with automatic backend selection and default limits
    pub fn auto() -> Self {
        Self::new(SandboxSelector::select(), SandboxPolicy::default())
    }

    pub fn from_config(config: &SandboxConfig) -> SandboxResult<Self> {
        let backend = SandboxSelector::select_by_name(&config.backend).ok_or_else(|| {
            SandboxError::NotSupported(format!("backend '{}' is not available", config.backend))
        })?;

        let mut executor = Self::new(backend, SandboxPolicy::from_config(config));
        if let Some(runtime) = config.runtime_path.as_deref() {
            executor.runtime_path = Self::resolve_runtime(runtime);
        }
        Ok(executor)
    }

    /// Use an explicit runtime binary, or none at all
    pub fn with_runtime_path(mut self, runtime_path: Option<PathBuf>) -> Self {
        self.runtime_path = runtime_path;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: MessageSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    fn discover_runtime() -> Option<PathBuf> {
        for name in DEFAULT_RUNTIMES {
            if let Ok(path) = which::which(name) {
                debug!(runtime = %path.display(), "Found JavaScript runtime");
                return Some(path);
            }
        }
        debug!("No JavaScript runtime found on PATH");
        None
    }

    fn resolve_runtime(runtime: &str) -> Option<PathBuf> {
        match which::which(runtime) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(runtime = %runtime, error = %e, "Configured JavaScript runtime not found");
                None
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Check if the backend is available
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Check if a JavaScript runtime was found
    pub fn is_runtime_available(&self) -> bool {
        self.runtime_path.is_some()
    }

    pub fn runtime_path(&self) -> Option<&Path> {
        self.runtime_path.as_deref()
    }

    pub fn policy(&self) -> &SandboxPolicy {
        &self.policy
    }

    /// Invoke `entry_point` from `fragment` with `args`
    ///
    /// `time_limit` defaults to the policy's budget. Never fails: runtime
    /// faults, worker failures and deadline overruns all become outcomes.
    #[instrument(skip(self, fragment, args), fields(backend = %self.backend.name()))]
    pub async fn invoke(
        &self,
        fragment: &str,
        entry_point: &str,
        args: &[Value],
        time_limit: Option<Duration>,
    ) -> ExecutionOutcome {
        let time_limit = time_limit.unwrap_or(self.policy.time_limit);
        let start = Instant::now();

        let outcome = match self.run_worker(fragment, entry_point, args, time_limit).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Invocation failed before the candidate produced a result");
                ExecutionOutcome::Faulted(self.sanitizer.sanitize(&e.to_string()))
            }
        };

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            completed = outcome.is_completed(),
            "Invocation finished"
        );
        outcome
    }

    async fn run_worker(
        &self,
        fragment: &str,
        entry_point: &str,
        args: &[Value],
        time_limit: Duration,
    ) -> SandboxResult<ExecutionOutcome> {
        if !is_valid_entry_point(entry_point) {
            return Err(SandboxError::InvalidEntryPoint(entry_point.to_string()));
        }
        let runtime = self
            .runtime_path
            .as_deref()
            .ok_or(SandboxError::RuntimeUnavailable)?;

        let payload = serde_json::to_vec(&WorkerRequest {
            source: fragment,
            entry: entry_point,
            args,
            timeout_ms: time_limit.as_millis().max(1) as u64,
        })?;

        let policy = self.policy.clone().with_time_limit(time_limit);
        let mut command = Command::new(runtime);
        command
            .arg(format!("--max-old-space-size={}", policy.max_heap_mb))
            .arg("-e")
            .arg(HARNESS)
            .env_clear()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        self.backend.apply_restrictions(&mut command, &policy)?;

        let mut child = command.spawn().map_err(|e| {
            SandboxError::CreationFailed(format!("Failed to spawn {}: {}", runtime.display(), e))
        })?;

        let deadline = policy.hard_deadline(time_limit);
        let reply = tokio::time::timeout(
            deadline,
            exchange(&mut child, &payload, policy.max_output_bytes),
        )
        .await;

        // The worker is done once it has answered
        let _ = child.start_kill();

        match reply {
            Err(_) => {
                warn!(deadline_ms = deadline.as_millis() as u64, "Worker missed hard deadline; killed");
                Ok(ExecutionOutcome::TimedOut)
            }
            Ok(reply) => self.interpret(reply?),
        }
    }

    fn interpret(&self, reply: WorkerReply) -> SandboxResult<ExecutionOutcome> {
        let line = match reply {
            WorkerReply::Line(line) => line,
            WorkerReply::Exited { status, stderr } => return self.interpret_exit(status, &stderr),
        };

        let response: WorkerResponse = serde_json::from_slice(&line)
            .map_err(|e| SandboxError::Protocol(format!("malformed worker response: {}", e)))?;

        Ok(match response {
            WorkerResponse::Completed { value } => ExecutionOutcome::Completed(value),
            WorkerResponse::Faulted { message } => {
                ExecutionOutcome::Faulted(self.sanitizer.sanitize(&message))
            }
            WorkerResponse::TimedOut => ExecutionOutcome::TimedOut,
        })
    }

    fn interpret_exit(&self, status: ExitStatus, stderr: &[u8]) -> SandboxResult<ExecutionOutcome> {
        #[cfg(target_os = "linux")]
        {
            if crate::infrastructure::process::exceeded_cpu_limit(&status) {
                return Ok(ExecutionOutcome::TimedOut);
            }
        }

        let stderr = String::from_utf8_lossy(stderr);
        if stderr.contains("heap out of memory") {
            return Ok(ExecutionOutcome::Faulted(
                "RangeError: JavaScript heap out of memory".to_string(),
            ));
        }

        debug!(%status, stderr = %stderr.trim(), "Worker exited without a response");
        Err(SandboxError::Protocol(format!(
            "worker exited ({}) without a result",
            status
        )))
    }
}

impl Default for SandboxExecutor {
    fn default() -> Self {
        Self::auto()
    }
}

/// Send the request and wait for the first response line or worker exit
async fn exchange(child: &mut Child, payload: &[u8], max_output_bytes: usize) -> SandboxResult<WorkerReply> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| SandboxError::CreationFailed("worker stdin not captured".to_string()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| SandboxError::CreationFailed("worker stdout not captured".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| SandboxError::CreationFailed("worker stderr not captured".to_string()))?;

    let stderr_task = tokio::spawn(async move {
        let mut stderr = stderr;
        let mut captured = Vec::new();
        let _ = (&mut stderr)
            .take(STDERR_CAPTURE_BYTES)
            .read_to_end(&mut captured)
            .await;
        let _ = tokio::io::copy(&mut stderr, &mut tokio::io::sink()).await;
        captured
    });

    let write = async move {
        match stdin.write_all(payload).await {
            // The worker died before reading; its exit status tells the story
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            other => other.map_err(SandboxError::from),
        }
    };

    let read = async move {
        let mut reader = BufReader::new(stdout.take(max_output_bytes as u64 + 1));
        let mut line = Vec::new();
        reader.read_until(b'\n', &mut line).await?;
        if line.len() > max_output_bytes {
            return Err(SandboxError::OutputLimitExceeded {
                limit: max_output_bytes,
            });
        }
        Ok(line)
    };

    let ((), line) = tokio::try_join!(write, read)?;

    if line.iter().any(|b| !b.is_ascii_whitespace()) {
        stderr_task.abort();
        return Ok(WorkerReply::Line(line));
    }

    let status = child.wait().await?;
    let stderr = stderr_task.await.unwrap_or_default();
    Ok(WorkerReply::Exited { status, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::noop::NoOpSandbox;
    use rstest::rstest;
    use serde_json::json;

    fn executor() -> SandboxExecutor {
        SandboxExecutor::new(Arc::new(NoOpSandbox::new()), SandboxPolicy::default())
    }

    #[rstest]
    #[case("add", true)]
    #[case("_private", true)]
    #[case("$jq", true)]
    #[case("twoSum2", true)]
    #[case("", false)]
    #[case("2fast", false)]
    #[case("a.b", false)]
    #[case("f()", false)]
    #[case("x; process.exit()", false)]
    fn test_entry_point_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_entry_point(name), expected);
    }

    #[tokio::test]
    async fn test_missing_runtime_is_a_fault() {
        let executor = executor().with_runtime_path(None);
        let outcome = executor.invoke("function f() {}", "f", &[], None).await;
        match outcome {
            ExecutionOutcome::Faulted(message) => {
                assert!(message.starts_with("JavaScript runtime not available"), "{message}")
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_entry_point_is_a_fault() {
        let outcome = executor()
            .invoke("function f() {}", "f); process.exit(", &[], None)
            .await;
        assert_eq!(
            outcome,
            ExecutionOutcome::Faulted("Invalid entry point name: 'f); process.exit('".to_string())
        );
    }

    #[tokio::test]
    async fn test_unspawnable_runtime_is_a_sanitized_fault() {
        let executor = executor().with_runtime_path(Some(PathBuf::from("/nonexistent/bin/node")));
        let outcome = executor.invoke("function f() {}", "f", &[], None).await;
        match outcome {
            ExecutionOutcome::Faulted(message) => {
                assert!(message.starts_with("Failed to create sandbox"), "{message}");
                assert!(!message.contains("/nonexistent/bin/node"), "{message}");
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_completed() {
        let reply = WorkerReply::Line(br#"{"status":"completed","value":{"a":[1,2]}}"#.to_vec());
        assert_eq!(
            executor().interpret(reply).unwrap(),
            ExecutionOutcome::Completed(json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn test_interpret_fault_is_sanitized() {
        let reply = WorkerReply::Line(
            br#"{"status":"faulted","message":"Error: cannot open /home/alice/secret.txt"}"#
                .to_vec(),
        );
        assert_eq!(
            executor().interpret(reply).unwrap(),
            ExecutionOutcome::Faulted("Error: cannot open [path]".to_string())
        );
    }

    #[test]
    fn test_interpret_timed_out() {
        let reply = WorkerReply::Line(b"{\"status\":\"timed_out\"}\n".to_vec());
        assert_eq!(executor().interpret(reply).unwrap(), ExecutionOutcome::TimedOut);
    }

    #[test]
    fn test_interpret_malformed_line() {
        let reply = WorkerReply::Line(b"not json\n".to_vec());
        assert!(matches!(
            executor().interpret(reply),
            Err(SandboxError::Protocol(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_interpret_exit_without_response() {
        use std::os::unix::process::ExitStatusExt;

        let oom = WorkerReply::Exited {
            status: ExitStatus::from_raw(6),
            stderr: b"FATAL ERROR: Reached heap limit Allocation failed - JavaScript heap out of memory"
                .to_vec(),
        };
        assert_eq!(
            executor().interpret(oom).unwrap(),
            ExecutionOutcome::Faulted("RangeError: JavaScript heap out of memory".to_string())
        );

        let silent = WorkerReply::Exited {
            status: ExitStatus::from_raw(1 << 8),
            stderr: Vec::new(),
        };
        assert!(matches!(
            executor().interpret(silent),
            Err(SandboxError::Protocol(_))
        ));
    }

    #[test]
    fn test_from_config_rejects_unknown_backend() {
        let config = SandboxConfig {
            backend: "landlock".to_string(),
            ..SandboxConfig::default()
        };
        assert!(matches!(
            SandboxExecutor::from_config(&config),
            Err(SandboxError::NotSupported(_))
        ));
    }

    #[test]
    fn test_from_config_applies_limits() {
        let config = SandboxConfig {
            backend: "noop".to_string(),
            timeout_ms: 1_500,
            ..SandboxConfig::default()
        };
        let executor = SandboxExecutor::from_config(&config).unwrap();
        assert_eq!(executor.backend_name(), "noop");
        assert_eq!(executor.policy().time_limit, Duration::from_millis(1_500));
    }
}
