//! CLI command implementations

pub mod capabilities;
pub mod check;
pub mod run;
pub mod sanitize;
