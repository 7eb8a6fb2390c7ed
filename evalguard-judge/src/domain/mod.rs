//! Judge domain: value comparison and the executor seam

pub mod comparator;
pub mod executor;
