//! Manual smoke test for a running approval relay.
//!
//! This example drives the HTTP surface of a deployed (or locally running)
//! instance end to end: the health and status pages, then one real approval
//! request.
//!
//! # Usage
//!
//! 1. Start the relay (`cargo run`) or pick a deployed instance.
//!
//! 2. Set `RELAY_URL` to its base URL (default `http://localhost:8080`).
//!
//! 3. Set `PR_URL` to the pull request to approve and `SECRET` to the current
//!    week's secret (the relay prints it at startup).
//!
//! 4. Run: `cargo run --example approve_smoke`
//!
//! # Note
//!
//! The final step submits a real approval through the relay. Point `PR_URL`
//! at a pull request you are allowed to review.

use std::env;

use pr_approver::github::PrLocator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pr_approver=debug".into()),
        )
        .init();

    let relay_url = env::var("RELAY_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let relay_url = relay_url.trim_end_matches('/').to_string();

    let pr_url =
        env::var("PR_URL").map_err(|_| anyhow::anyhow!("PR_URL environment variable not set"))?;
    let secret = env::var("SECRET").map_err(|_| {
        anyhow::anyhow!("SECRET environment variable not set (the relay prints it at startup)")
    })?;

    let pr = PrLocator::parse(&pr_url)?;

    println!("\n=== Approval Relay Smoke Test ===\n");
    println!("Relay: {}", relay_url);
    println!("Pull request: {}", pr);
    println!();

    let http = reqwest::Client::new();
    let mut passed = 0;
    let mut failed = 0;

    // ─── Liveness ────────────────────────────────────────────────────────────

    println!("--- Liveness ---");

    match http.get(format!("{relay_url}/health")).send().await {
        Ok(response) if response.status().is_success() => {
            println!("  [PASS] GET /health");
            passed += 1;
        }
        Ok(response) => {
            println!("  [FAIL] GET /health: status {}", response.status());
            failed += 1;
        }
        Err(e) => {
            println!("  [FAIL] GET /health: {}", e);
            failed += 1;
        }
    }

    match http.get(format!("{relay_url}/")).send().await {
        Ok(response) if response.status().is_success() => {
            let page = response.text().await?;
            if let Some(line) = page.lines().find(|line| line.contains("Current week")) {
                println!("  [PASS] GET / ({})", line.trim());
            } else {
                println!("  [PASS] GET /");
            }
            passed += 1;
        }
        Ok(response) => {
            println!("  [FAIL] GET /: status {}", response.status());
            failed += 1;
        }
        Err(e) => {
            println!("  [FAIL] GET /: {}", e);
            failed += 1;
        }
    }

    // ─── Approval ────────────────────────────────────────────────────────────

    println!("\n--- Approval ---");

    let response = http
        .post(format!("{relay_url}/approve"))
        .json(&serde_json::json!({ "pr_url": pr_url, "secret": secret }))
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if status.is_success() {
        println!("  [PASS] POST /approve ({} approved)", pr);
        passed += 1;
    } else {
        println!("  [FAIL] POST /approve: status {} body {}", status, body);
        failed += 1;
    }

    println!("\n=== {} passed, {} failed ===\n", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
