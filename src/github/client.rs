//! The outbound approval call.
//!
//! `ApprovalClient` holds a configured HTTP client and the credential read at
//! startup, and submits an approving review for a pull request. The API base
//! URL is injectable so tests can point it at a local mock server.

use std::time::Duration;

use http::header;
use tracing::{debug, warn};
use url::Url;

use super::error::ApprovalError;
use super::locator::PrLocator;

/// Outbound request timeout. A wedged upstream must not pin handlers forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A GitHub API client that submits approving reviews.
#[derive(Clone)]
pub struct ApprovalClient {
    http: reqwest::Client,
    api_base: Url,
    token: String,
}

impl ApprovalClient {
    /// Creates a client from a GitHub token and an API base URL
    /// (`https://api.github.com` outside of tests).
    pub fn new(token: impl Into<String>, api_base: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pr-approver/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(ApprovalClient {
            http,
            api_base,
            token: token.into(),
        })
    }

    /// Submits an approving review for the pull request.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Upstream`] when GitHub answers with a
    /// non-success status (the response body is carried along for relaying),
    /// and [`ApprovalError::Transport`] when no response was received at all.
    pub async fn approve(&self, pr: &PrLocator) -> Result<(), ApprovalError> {
        let url = self.reviews_url(pr);
        debug!(pr = %pr, url = %url, "submitting approving review");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .json(&serde_json::json!({ "event": "APPROVE" }))
            .send()
            .await
            .map_err(ApprovalError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!(pr = %pr, status = %status, "review accepted");
            return Ok(());
        }

        let text = response.text().await.map_err(ApprovalError::Transport)?;
        let body = serde_json::from_str(&text).unwrap_or_else(|_| serde_json::Value::String(text));

        warn!(pr = %pr, status = %status, "GitHub rejected the review");
        Err(ApprovalError::Upstream { status, body })
    }

    /// The review-creation endpoint for a pull request.
    fn reviews_url(&self, pr: &PrLocator) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.api_base.as_str().trim_end_matches('/'),
            pr.repo().owner,
            pr.repo().repo,
            pr.number().0,
        )
    }
}

impl std::fmt::Debug for ApprovalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token stays out of debug output.
        f.debug_struct("ApprovalClient")
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}
