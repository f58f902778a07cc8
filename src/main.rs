use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pr_approver::config::Config;
use pr_approver::github::ApprovalClient;
use pr_approver::secret::{FileSecretStore, WeeklySecrets};
use pr_approver::server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pr_approver=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let store = FileSecretStore::new(config.secret_file);
    tracing::debug!(path = %store.path().display(), "weekly secret record");
    let secrets = WeeklySecrets::new(store);

    // The secret is distributed to approvers by reading it off this log line.
    let record = secrets.current()?;
    tracing::info!(week = %record.week, secret = %record.secret, "this week's approval secret");

    let github = ApprovalClient::new(config.github_token, config.github_api_base)?;
    let app = build_router(AppState::new(secrets, github));

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
