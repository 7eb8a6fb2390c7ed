//! Safety application layer

pub mod analyzer;
