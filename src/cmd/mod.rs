//! Command-line entry points.

pub mod analyze;
