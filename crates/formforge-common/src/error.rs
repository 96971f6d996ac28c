//! Common error types used throughout formforge.
//!
//! This module provides a unified error type covering the conversion domain
//! (unsupported pairs, adapter failures, reconciliation defects) as well as
//! generic failure cases such as database and I/O errors.

/// Common error type for formforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No registered backend supports the requested conversion pair.
    #[error("No converter supports {from} -> {to}")]
    Unsupported {
        /// Normalized source extension.
        from: String,
        /// Normalized target extension.
        to: String,
    },

    /// The external conversion process signalled failure.
    #[error("Converter failed: {0}")]
    AdapterFailed(String),

    /// Reconciliation found no candidate output for a finished conversion.
    #[error("No output files generated for {0}")]
    NoOutputGenerated(String),

    /// The combined size of discovered output fragments exceeds the archive ceiling.
    #[error("Total frame size ({total_bytes} bytes) exceeds the {limit_bytes} byte zip limit")]
    ZipMemoryLimitExceeded {
        total_bytes: u64,
        limit_bytes: u64,
    },

    /// A derived output path escaped the configured output directory.
    #[error("Path traversal detected: {0}")]
    PathTraversalDetected(String),

    /// Writing the fragment archive failed.
    #[error("Archive error: {0}")]
    Archive(String),

    /// A required external tool is not installed.
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Unsupported error for a conversion pair.
    pub fn unsupported<F: Into<String>, T: Into<String>>(from: F, to: T) -> Self {
        Self::Unsupported {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a new AdapterFailed error.
    pub fn adapter_failed<S: Into<String>>(msg: S) -> Self {
        Self::AdapterFailed(msg.into())
    }

    /// Create a new NoOutputGenerated error for a file name.
    pub fn no_output<S: Into<String>>(file_name: S) -> Self {
        Self::NoOutputGenerated(file_name.into())
    }

    /// Create a new PathTraversalDetected error.
    pub fn path_traversal<S: Into<String>>(msg: S) -> Self {
        Self::PathTraversalDetected(msg.into())
    }

    /// Create a new Archive error.
    pub fn archive<S: Into<String>>(msg: S) -> Self {
        Self::Archive(msg.into())
    }

    /// Create a new ToolNotFound error.
    pub fn tool_not_found<S: Into<String>>(name: S) -> Self {
        Self::ToolNotFound(name.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
