//! Sandbox infrastructure implementations

#[cfg(target_os = "linux")]
pub mod process;

pub mod noop;
