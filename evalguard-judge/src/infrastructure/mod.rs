//! Executor adapters

pub mod sandbox;
