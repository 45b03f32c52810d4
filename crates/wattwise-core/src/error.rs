//! Shared error type across Wattwise crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed request (bad JSON, bad session id, bad config).
    BadRequest,
    /// A submitted record carries a negative or non-finite value.
    InvalidRecord,
    /// A report was requested before any record was submitted.
    EmptyDataset,
    /// The gateway already holds its maximum number of sessions.
    SessionLimit,
    /// Unsupported config/protocol version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidRecord => "INVALID_RECORD",
            ClientCode::EmptyDataset => "EMPTY_DATASET",
            ClientCode::SessionLimit => "SESSION_LIMIT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WattwiseError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum WattwiseError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("no records entered yet")]
    EmptyDataset,
    #[error("session limit reached")]
    SessionLimit,
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl WattwiseError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            WattwiseError::BadRequest(_) => ClientCode::BadRequest,
            WattwiseError::InvalidRecord(_) => ClientCode::InvalidRecord,
            WattwiseError::EmptyDataset => ClientCode::EmptyDataset,
            WattwiseError::SessionLimit => ClientCode::SessionLimit,
            WattwiseError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            WattwiseError::Internal(_) => ClientCode::Internal,
        }
    }
}
