//! Safety domain layer
//!
//! - Rules: declarative (pattern, severity, message) entries
//! - Findings: one per matched rule
//! - Host APIs: identifiers the capability detector recognises

pub mod capability;
pub mod finding;
pub mod rule;

pub use capability::*;
pub use finding::*;
pub use rule::*;
