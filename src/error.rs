//! Error taxonomy for the adapter.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, OpenwhydError>;

/// Failure categories surfaced at the query-facade boundary.
///
/// Callers can rely on the variant to tell upstream trouble apart from local
/// trouble: `Transport` and `Parse` come from the upstream exchange, `Auth`
/// from a rejected or missing credential, `Store` from the session store
/// collaborator.
#[derive(Error, Debug)]
pub enum OpenwhydError {
    /// Network, DNS or connection failure, or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not valid JSON or lacked an expected field.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Login rejected by the upstream, or no usable session credential.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Session store read or write failure.
    #[error("session store error: {0}")]
    Store(String),
}

impl OpenwhydError {
    /// Parse failure for a response that decoded as JSON but is missing a
    /// field the operation needs.
    pub fn missing_field(field: &str) -> Self {
        use serde::de::Error;
        OpenwhydError::Parse(serde_json::Error::custom(format!(
            "missing field `{field}` in upstream response"
        )))
    }

    /// True for failures of the authentication flow.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, OpenwhydError::Auth(_))
    }

    /// True for failures of the session store collaborator.
    pub fn is_store_error(&self) -> bool {
        matches!(self, OpenwhydError::Store(_))
    }
}
