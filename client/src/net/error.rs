//! Error type shared by the auth and data clients.
//!
//! ERROR HANDLING
//! ==============
//! Every backend call returns `BackendError`. Screens show its `Display`
//! text; `error_code` gives a stable tag for logs.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use records::LeaseConflict;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("backend not configured")]
    NotConfigured,
    #[error("not available on server")]
    Unavailable,
    #[error("not signed in")]
    Unauthenticated,
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Conflict(#[from] LeaseConflict),
}

impl BackendError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_NOT_CONFIGURED",
            Self::Unavailable => "E_UNAVAILABLE",
            Self::Unauthenticated => "E_UNAUTHENTICATED",
            Self::Network(_) => "E_NETWORK",
            Self::Http { .. } => "E_HTTP",
            Self::Decode(_) => "E_DECODE",
            Self::NotFound => "E_NOT_FOUND",
            Self::Conflict(_) => "E_LEASE_CONFLICT",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Build an HTTP error from a non-2xx status and its response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http { status, message: response_message(status, body) }
    }
}

/// Pull the human-readable message out of an auth or data API error body.
///
/// Auth errors use `error_description` or `msg`; data errors use `message`.
pub(crate) fn response_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .into_iter()
                .find_map(|key| v.get(key).and_then(serde_json::Value::as_str))
        })
        .filter(|m| !m.is_empty())
        .map_or_else(|| format!("request failed: {status}"), str::to_owned)
}
