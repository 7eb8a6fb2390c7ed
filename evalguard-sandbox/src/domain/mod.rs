//! Sandbox domain types

pub mod outcome;
pub mod policy;
pub mod traits;
