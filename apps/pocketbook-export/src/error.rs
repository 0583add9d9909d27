//! Error types for the PocketBook exporter
//!
//! Two levels of failure exist: [`ExportError`] aborts the whole run, while
//! [`DecodeError`] only ever costs a single annotation.

use std::path::PathBuf;

use thiserror::Error;

/// Run-level result type
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that abort an export run
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Database file not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("Unexpected database schema: {0}")]
    Schema(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to render report: {0}")]
    Render(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ExportError {
    /// Whether the error stems from how the tool was invoked rather than
    /// from the store or the filesystem.
    pub fn is_usage(&self) -> bool {
        matches!(self, ExportError::DatabaseNotFound(_))
    }

    /// Process exit status: 2 for usage errors, 1 for everything else
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            2
        } else {
            1
        }
    }
}

/// Errors raised while decoding the tags of a single item
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed JSON value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing tag: {0}")]
    MissingTag(&'static str),

    #[error("Missing field `{0}` in tag value")]
    MissingField(&'static str),

    #[error("Tag value is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Anchor has no page parameter: {0}")]
    MissingPage(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}
