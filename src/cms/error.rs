//! CMS client error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Faults raised by [`super::CmsClient::fetch_api`].
///
/// The content layer swallows all of them; they only surface to callers of
/// the `try_*` operations.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("invalid request header `{0}`")]
    Header(String),

    #[error("HTTP error! status: {status} ({endpoint})")]
    Status { endpoint: String, status: u16 },

    #[error("request to `{endpoint}` failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response body from `{endpoint}`")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CmsError {
    /// HTTP status for [`CmsError::Status`], `None` otherwise.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Render an error with its whole `source()` chain, `outer: inner: root`.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
