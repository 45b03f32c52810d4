use std::fmt;

use uuid::Uuid;
use wattwise_core::error::{Result, WattwiseError};

/// Longest accepted session id.
pub const MAX_SESSION_ID_LEN: usize = 64;

/// Opaque session identifier: 1..=64 chars of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validate a client-supplied id.
    pub fn parse(raw: &str) -> Result<Self> {
        let ok_len = !raw.is_empty() && raw.len() <= MAX_SESSION_ID_LEN;
        let ok_chars = raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !(ok_len && ok_chars) {
            return Err(WattwiseError::BadRequest(format!("invalid session id: {raw:?}")));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
