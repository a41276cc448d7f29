//! Render error types.
//!
//! Rendering itself is infallible by design; a receipt must always come
//! out, logo or no logo. Only writing the finished document can fail.

use thiserror::Error;

/// Receipt output errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the ticket file failed.
    #[error("Failed to write ticket: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
