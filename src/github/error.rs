//! Error types for the outbound approval call.
//!
//! The two variants match what the HTTP layer needs to do with a failure:
//! an [`Upstream`](ApprovalError::Upstream) error is relayed to the caller
//! with the remote status and body, while a
//! [`Transport`](ApprovalError::Transport) error is classified to a fixed
//! 500 and its detail goes to the log only.

use http::StatusCode;
use thiserror::Error;

/// Failure of an approval call to GitHub.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// GitHub answered with a non-success status.
    ///
    /// `body` is the remote response body, decoded as JSON when possible
    /// and carried as a JSON string otherwise.
    #[error("GitHub answered HTTP {status}")]
    Upstream {
        status: StatusCode,
        body: serde_json::Value,
    },

    /// The request never produced an HTTP response (connect failure,
    /// timeout, DNS, TLS).
    #[error("failed to reach GitHub: {0}")]
    Transport(#[source] reqwest::Error),
}
