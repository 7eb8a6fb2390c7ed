//! Evalguard Core - Foundation crate for the evalguard evaluation engine
//!
//! This crate provides functionality shared by every evalguard crate:
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with file and environment variable support
//! - [`domain`] - Report types exchanged with collaborators (safety reports, test cases, run reports)
//! - [`application`] - Shared services such as the diagnostic message sanitizer
//! - [`logging`] - Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! evalguard-core/
//! ├── domain/           # Pure data exchanged with collaborators
//! │   ├── safety        # SafetyReport
//! │   └── evaluation    # TestCase, TestCaseResult, TestRunReport
//! ├── application/      # Shared services
//! │   └── sanitizer     # Path redaction and length bounding
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use evalguard_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `EVALGUARD__` prefix with double underscore separators:
//!
//! ```bash
//! EVALGUARD__SANDBOX__TIMEOUT_MS=3000
//! EVALGUARD__LOGGING__LEVEL=debug
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod logging;

pub use application::sanitizer::{MessageSanitizer, SanitizedMessage, sanitize};
pub use config::Config;
pub use domain::evaluation::{CaseStatus, TestCase, TestCaseResult, TestRunReport};
pub use domain::safety::SafetyReport;
pub use logging::init_tracing;
