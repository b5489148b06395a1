use core::result::Result as CoreResult;
use std::io::Error as IoError;

use thiserror::Error;

/// Result type for harness operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while preparing or driving a tool run.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// The tool binary could not be located.
    #[error("binary '{0}' not found, provide an explicit path")]
    BinaryNotFound(String),

    /// The command template is empty or malformed.
    #[error("invalid command template: {0}")]
    Template(String),

    /// Target enumeration failed.
    #[error("target enumeration failed: {0}")]
    Enumeration(String),

    /// Configuration is invalid or missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}
