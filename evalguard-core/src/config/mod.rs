//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub analysis: AnalysisConfig,
    pub sandbox: SandboxConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// One of `json`, `pretty`, `compact`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Safety analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Optional TOML/JSON file with additional pattern rules
    pub rules_file: Option<PathBuf>,
    /// Include the built-in pattern library (disable only for experiments)
    pub include_builtin_rules: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            include_builtin_rules: true,
        }
    }
}

/// Sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Sandbox backend preference: "auto", "process", "noop"
    pub backend: String,
    /// Time budget per invocation in milliseconds
    pub timeout_ms: u64,
    /// Extra wall-clock allowance for worker start-up before the hard kill
    pub startup_grace_ms: u64,
    /// V8 old-space limit handed to the worker
    pub max_heap_mb: u64,
    /// Maximum bytes accepted on the worker's stdout
    pub max_output_bytes: usize,
    /// Explicit JavaScript runtime binary; discovered on PATH when unset
    pub runtime_path: Option<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            backend: "auto".to_string(),
            timeout_ms: 5_000,
            startup_grace_ms: 2_000,
            max_heap_mb: 256,
            max_output_bytes: 1024 * 1024, // 1MB
            runtime_path: None,
        }
    }
}

impl SandboxConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }
}

/// Diagnostic display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Upper bound on sanitized diagnostic length, in characters
    pub max_message_length: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_message_length: crate::application::sanitizer::MAX_MESSAGE_LENGTH,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.sandbox.validate()?;
        self.diagnostics.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("EVALGUARD").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from one explicit file, with environment overrides on top
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let config: Config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(config::Environment::with_prefix("EVALGUARD").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
