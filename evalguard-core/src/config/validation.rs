//! Configuration validation module

use crate::config::{DiagnosticsConfig, LoggingConfig, SandboxConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("Sandbox configuration error: {message}")]
    Sandbox { message: String },

    #[error("Diagnostics configuration error: {message}")]
    Diagnostics { message: String },
}

impl ValidationError {
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn sandbox(message: impl Into<String>) -> Self {
        Self::Sandbox {
            message: message.into(),
        }
    }

    pub fn diagnostics(message: impl Into<String>) -> Self {
        Self::Diagnostics {
            message: message.into(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["json", "pretty", "compact"];
const SANDBOX_BACKENDS: &[&str] = &["auto", "process", "noop", "none", "disabled"];

/// Upper bound for a single invocation budget
pub const MAX_TIMEOUT_MS: u64 = 60_000;

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ValidationError::logging(format!(
                "Unknown log level '{}', expected one of {}",
                self.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if !LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected one of {}",
                self.format,
                LOG_FORMATS.join(", ")
            )));
        }

        Ok(())
    }
}

impl Validate for SandboxConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ValidationError::sandbox(format!(
                "timeout_ms must be in range 1-{}, got {}",
                MAX_TIMEOUT_MS, self.timeout_ms
            )));
        }

        if self.max_heap_mb < 16 {
            return Err(ValidationError::sandbox(format!(
                "max_heap_mb must be at least 16, got {}",
                self.max_heap_mb
            )));
        }

        if self.max_output_bytes == 0 {
            return Err(ValidationError::sandbox(
                "max_output_bytes must be greater than 0",
            ));
        }

        if !SANDBOX_BACKENDS.contains(&self.backend.to_lowercase().as_str()) {
            return Err(ValidationError::sandbox(format!(
                "Unknown sandbox backend '{}', expected one of {}",
                self.backend,
                SANDBOX_BACKENDS.join(", ")
            )));
        }

        if let Some(ref runtime) = self.runtime_path {
            if runtime.trim().is_empty() {
                return Err(ValidationError::sandbox("runtime_path cannot be empty"));
            }
        }

        Ok(())
    }
}

impl Validate for DiagnosticsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // Room for at least one character plus the ellipsis marker
        if self.max_message_length < 4 {
            return Err(ValidationError::diagnostics(format!(
                "max_message_length must be at least 4, got {}",
                self.max_message_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("info", "json", true)]
    #[case("DEBUG", "pretty", true)]
    #[case("verbose", "json", false)]
    #[case("warn", "xml", false)]
    fn test_logging_validation(#[case] level: &str, #[case] format: &str, #[case] ok: bool) {
        let config = LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
        };
        assert_eq!(config.validate().is_ok(), ok);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(MAX_TIMEOUT_MS, true)]
    #[case(MAX_TIMEOUT_MS + 1, false)]
    fn test_sandbox_timeout_bounds(#[case] timeout_ms: u64, #[case] ok: bool) {
        let config = SandboxConfig {
            timeout_ms,
            ..SandboxConfig::default()
        };
        assert_eq!(config.validate().is_ok(), ok);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let config = SandboxConfig {
            backend: "landlock".to_string(),
            ..SandboxConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("landlock"));
    }

    #[test]
    fn test_small_heap_rejected() {
        let config = SandboxConfig {
            max_heap_mb: 8,
            ..SandboxConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_diagnostics_minimum_length() {
        assert!(DiagnosticsConfig { max_message_length: 3 }.validate().is_err());
        assert!(DiagnosticsConfig { max_message_length: 4 }.validate().is_ok());
    }
}
