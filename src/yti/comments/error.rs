use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, CommentsError>;

/// Error type covering the failure cases of the comment round services, the
/// export pipeline and the command line tooling around them.
#[derive(Debug, Error)]
pub enum CommentsError {
    /// Wrapper for IO failures such as reading datasets or writing exports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook read back from disk is not shaped as expected.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Malformed identifiers or request payloads.
    #[error("not acceptable: {0}")]
    NotAcceptable(String),

    /// Raised when a round, thread or comment does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Raised when the configured export timezone is not a known IANA zone.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Raised when a configuration file holds values that cannot be used.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl CommentsError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        CommentsError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// HTTP status an API layer surfaces for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CommentsError::NotAcceptable(_) => 406,
            CommentsError::NotFound { .. } => 404,
            _ => 500,
        }
    }
}
