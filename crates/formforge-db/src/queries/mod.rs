//! Database query operations.

pub mod file_results;
pub mod jobs;
