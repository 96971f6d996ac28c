//! Formforge-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across formforge:
//!
//! - **Typed IDs**: Type-safe UUID wrapper for conversion jobs
//! - **Core Types**: The per-file conversion outcome and its recorded status text
//! - **Path Utilities**: Extension normalization and filename handling
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use formforge_common::{JobId, TaskOutcome, Error, Result};
//! use formforge_common::paths::normalize_filetype;
//!
//! // Create typed IDs
//! let job_id = JobId::new();
//!
//! // Normalize raw extensions
//! assert_eq!(normalize_filetype("JPG"), "jpeg");
//!
//! // Per-file outcomes carry their recorded status text
//! assert_eq!(TaskOutcome::Unsupported.status_text(), "File type not supported");
//!
//! // Use common error types
//! fn example() -> Result<()> {
//!     Err(Error::unsupported("docx", "mp3"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
