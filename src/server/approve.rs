//! Approval endpoint handler.
//!
//! Accepts `{"pr_url": "...", "secret": "..."}`, validates the secret
//! against the current week's value, parses the PR URL, and relays the
//! approval to GitHub. Every failure is classified into [`ApproveError`];
//! internal error detail goes to the log, never into the response body.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::github::error::ApprovalError;
use crate::github::locator::{LocatorError, PrLocator};
use crate::secret::service::SecretError;

/// Errors that can occur when processing an approval request.
#[derive(Debug, Error)]
pub enum ApproveError {
    /// One or both request fields are missing or empty.
    #[error("PR URL and secret are required")]
    MissingFields,

    /// The request body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The supplied secret does not match the current week's secret.
    #[error("Invalid secret")]
    InvalidSecret,

    /// The PR URL does not name a pull request on github.com.
    #[error("invalid PR URL: {0}")]
    InvalidPrUrl(#[from] LocatorError),

    /// The current secret could not be resolved.
    #[error("secret lookup failed: {0}")]
    Secrets(#[from] SecretError),

    /// The outbound GitHub call failed.
    #[error(transparent)]
    Approval(#[from] ApprovalError),
}

impl IntoResponse for ApproveError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApproveError::MissingFields => {
                (StatusCode::BAD_REQUEST, Value::from(self.to_string()))
            }
            ApproveError::InvalidJson(_) => {
                (StatusCode::BAD_REQUEST, Value::from(self.to_string()))
            }
            ApproveError::InvalidSecret => {
                (StatusCode::UNAUTHORIZED, Value::from(self.to_string()))
            }
            ApproveError::InvalidPrUrl(_) => {
                (StatusCode::BAD_REQUEST, Value::from(self.to_string()))
            }
            // The remote status and error body are relayed as-is.
            ApproveError::Approval(ApprovalError::Upstream { status, body }) => {
                (*status, body.clone())
            }
            ApproveError::Approval(ApprovalError::Transport(e)) => {
                error!(error = %e, "could not reach GitHub");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::from("failed to reach GitHub"),
                )
            }
            ApproveError::Secrets(e) => {
                error!(error = %e, "weekly secret lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::from("internal server error"),
                )
            }
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Approval request body. Both fields are optional at the serde layer so the
/// handler itself can produce the missing-fields error.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pr_url: Option<String>,
    secret: Option<String>,
}

/// Success body: `{"status": "approved"}`.
#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    status: &'static str,
}

impl ApproveResponse {
    fn approved() -> Self {
        ApproveResponse { status: "approved" }
    }
}

/// Approval handler.
///
/// # Request
///
/// - Method: POST
/// - Body: `{"pr_url": "https://github.com/owner/repo/pull/N", "secret": "..."}`
///
/// # Response
///
/// - 200: approval submitted, body `{"status": "approved"}`
/// - 400: missing fields, invalid JSON, or an unusable PR URL
/// - 401: wrong secret
/// - 500: secret store or network failure (generic message)
/// - any other status: relayed from GitHub together with its error body
pub async fn approve_handler(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApproveResponse>, ApproveError> {
    let request: ApproveRequest = serde_json::from_slice(&body)?;

    let (pr_url, supplied) = match (request.pr_url.as_deref(), request.secret.as_deref()) {
        (Some(pr_url), Some(secret)) if !pr_url.is_empty() && !secret.is_empty() => {
            (pr_url, secret)
        }
        _ => return Err(ApproveError::MissingFields),
    };

    // Validate the secret before parsing the URL.
    let expected = app_state.secrets().current()?;
    if !secrets_match(supplied, &expected.secret) {
        warn!("approval rejected: wrong secret");
        return Err(ApproveError::InvalidSecret);
    }

    let pr = PrLocator::parse(pr_url)?;
    debug!(pr = %pr, "relaying approval to GitHub");

    app_state.github().approve(&pr).await?;

    info!(pr = %pr, "pull request approved");
    Ok(Json(ApproveResponse::approved()))
}

/// Constant-time comparison of the supplied secret against the expected one.
fn secrets_match(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::store::SecretStoreError;
    use http_body_util::BodyExt;

    #[test]
    fn secrets_match_agrees_with_equality() {
        assert!(secrets_match("abc123", "abc123"));
        assert!(!secrets_match("abc123", "abc124"));
        assert!(!secrets_match("abc", "abc123"));
        assert!(!secrets_match("", "abc123"));
    }

    async fn response_parts(err: ApproveError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_fields_maps_to_400() {
        let (status, body) = response_parts(ApproveError::MissingFields).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "PR URL and secret are required" }));
    }

    #[tokio::test]
    async fn invalid_secret_maps_to_401() {
        let (status, body) = response_parts(ApproveError::InvalidSecret).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid secret" }));
    }

    #[tokio::test]
    async fn invalid_pr_url_maps_to_400() {
        let err = ApproveError::InvalidPrUrl(LocatorError::InvalidPrNumber);
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "invalid PR URL: pull request number must be a positive integer" })
        );
    }

    #[tokio::test]
    async fn upstream_error_is_relayed_with_its_body() {
        let err = ApproveError::Approval(ApprovalError::Upstream {
            status: StatusCode::NOT_FOUND,
            body: json!({ "message": "Not Found" }),
        });
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": { "message": "Not Found" } }));
    }

    #[tokio::test]
    async fn secret_failure_maps_to_a_generic_500() {
        let err = ApproveError::Secrets(SecretError::Store(SecretStoreError::Io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "disk said no"),
        )));
        let (status, body) = response_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal server error" }));
    }
}
