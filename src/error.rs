use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Fatal failures that abort an ingest. Row-level validation problems are not
/// represented here; they are collected as [`RowError`](crate::model::RowError)
/// values on the parse result instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Wrapper for IO failures such as reading the uploaded file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of a result fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("workbook read error: {0}")]
    WorkbookRead(#[from] calamine::Error),

    /// Raised when the buffer is not a spreadsheet container we understand.
    #[error("invalid workbook: {0}")]
    InvalidWorkbook(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
