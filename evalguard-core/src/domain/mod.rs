//! Evalguard domain layer
//!
//! Data exchanged with collaborators: the pre-flight safety report and the
//! test case / run report types.

pub mod evaluation;
pub mod safety;

pub use evaluation::*;
pub use safety::*;
