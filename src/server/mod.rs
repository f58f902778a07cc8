//! HTTP server for the approval relay.
//!
//! # Endpoints
//!
//! - `GET /` - Status page naming the current week
//! - `POST /approve` - Validates the weekly secret and relays a PR approval to GitHub
//! - `GET /health` - Returns 200 if the server is running

use std::sync::Arc;

pub mod approve;
pub mod health;
pub mod home;

pub use approve::approve_handler;
pub use health::health_handler;
pub use home::home_handler;

use crate::github::ApprovalClient;
use crate::secret::WeeklySecrets;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The rotating weekly secret.
    secrets: WeeklySecrets,

    /// Client for the outbound approval call.
    github: ApprovalClient,
}

impl AppState {
    /// Creates a new `AppState` from the secret service and the GitHub client.
    pub fn new(secrets: WeeklySecrets, github: ApprovalClient) -> Self {
        AppState {
            inner: Arc::new(AppStateInner { secrets, github }),
        }
    }

    /// Returns the weekly secret service.
    pub fn secrets(&self) -> &WeeklySecrets {
        &self.inner.secrets
    }

    /// Returns the GitHub approval client.
    pub fn github(&self) -> &ApprovalClient {
        &self.inner.github
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/", get(home_handler))
        .route("/approve", post(approve_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::MemorySecretStore;
    use url::Url;

    fn test_state() -> AppState {
        let secrets = WeeklySecrets::new(MemorySecretStore::default());
        let github =
            ApprovalClient::new("test-token", Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        AppState::new(secrets, github)
    }

    #[test]
    fn cloned_state_shares_the_secret_service() {
        let state = test_state();
        let cloned = state.clone();

        assert_eq!(
            state.secrets().current().unwrap(),
            cloned.secrets().current().unwrap()
        );
    }
}
