//! Shared application services

pub mod sanitizer;
