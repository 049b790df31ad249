#![forbid(unsafe_code)]

//! Demo errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Sheet(#[from] qsheet::SheetError),

    #[error("preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences format: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging already initialized")]
    Logging,
}
