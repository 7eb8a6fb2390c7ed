//! Judge application layer

pub mod runner;
