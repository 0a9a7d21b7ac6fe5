//! Window subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("window lookup failed: {0}")]
    Lookup(String),

    #[error("failed to raise window: {0}")]
    Raise(String),

    #[error("failed to create session: {0}")]
    SessionCreate(String),

    #[error("backend not available on this platform")]
    Unavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
