//! Sandbox backend selector
//!
//! Chooses the strongest backend the platform supports.

use std::sync::Arc;
use tracing::debug;

use crate::domain::traits::SandboxBackend;
use crate::infrastructure::noop::NoOpSandbox;

#[cfg(target_os = "linux")]
use crate::infrastructure::process::ProcessSandbox;

/// Sandbox backend selector
pub struct SandboxSelector;

impl SandboxSelector {
    /// Select the best available sandbox backend
    pub fn select() -> Arc<dyn SandboxBackend> {
        #[cfg(target_os = "linux")]
        {
            debug!("Using process sandbox (rlimits)");
            return Arc::new(ProcessSandbox::new());
        }

        #[cfg(not(target_os = "linux"))]
        {
            debug!("No process restrictions on this platform; using no-op sandbox");
            Arc::new(NoOpSandbox::new())
        }
    }

    /// Select a specific backend by name
    ///
    /// Valid names: "auto", "process", "noop" (or "none"/"disabled")
    pub fn select_by_name(name: &str) -> Option<Arc<dyn SandboxBackend>> {
        match name.trim().to_lowercase().as_str() {
            "auto" => Some(Self::select()),

            "noop" | "none" | "disabled" => {
                debug!("Using no-op sandbox backend (restrictions disabled)");
                Some(Arc::new(NoOpSandbox::new()))
            }

            #[cfg(target_os = "linux")]
            "process" => Some(Arc::new(ProcessSandbox::new())),

            _ => {
                debug!(backend = %name, "Unknown or unsupported sandbox backend");
                None
            }
        }
    }

    /// Name of the backend `select` would return
    pub fn best_available() -> &'static str {
        if cfg!(target_os = "linux") {
            "process"
        } else {
            "noop"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_auto_selection_matches_best_available() {
        let backend = SandboxSelector::select();
        assert_eq!(backend.name(), SandboxSelector::best_available());
        assert!(backend.is_available());
    }

    #[rstest]
    #[case("noop")]
    #[case("none")]
    #[case("Disabled")]
    fn test_noop_aliases(#[case] name: &str) {
        let backend = SandboxSelector::select_by_name(name).unwrap();
        assert_eq!(backend.name(), "noop");
    }

    #[test]
    fn test_select_unknown() {
        assert!(SandboxSelector::select_by_name("landlock").is_none());
        assert!(SandboxSelector::select_by_name("").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_select_process_on_linux() {
        let backend = SandboxSelector::select_by_name("process").unwrap();
        assert_eq!(backend.name(), "process");
    }
}
