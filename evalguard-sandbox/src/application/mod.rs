//! Sandbox application layer

pub mod executor;
pub mod selector;
