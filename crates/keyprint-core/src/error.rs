//! Error types for the keyprint core library.

use thiserror::Error;

/// Core error type for keystore discovery and inspection.
#[derive(Error, Debug)]
pub enum KeyprintError {
    /// A configured location, SDK installation, or installed package is
    /// simply absent. Expected and recovered per source.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The certificate tool ran but rejected the keystore, credentials, or
    /// artifact.
    #[error("Inspection failed: {0}")]
    InspectionFailed(String),

    /// Pulling an artifact off a connected device failed.
    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    /// A required external tool is not available on PATH. The only
    /// run-level fatal condition, checked once before any source.
    #[error("Required tool '{0}' was not found on PATH")]
    ToolMissing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for keyprint operations.
pub type Result<T> = std::result::Result<T, KeyprintError>;
