//! Safety infrastructure layer
//!
//! Regex caching, the built-in pattern library, rule loaders, the
//! structural loop scanner and the capability detector.

pub mod capabilities;
pub mod loop_scan;
pub mod matcher;
pub mod regex_cache;
pub mod rules;
