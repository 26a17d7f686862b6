//! Core error types

use thiserror::Error;

/// Errors raised by the shuffle core
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid window parameters, detected before any I/O
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Read or write failure other than downstream pipe closure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
