//! Process configuration from environment variables.
//!
//! | Variable          | Required | Default                  |
//! |-------------------|----------|--------------------------|
//! | `GITHUB_TOKEN`    | yes      | -                        |
//! | `PORT`            | no       | `8080`                   |
//! | `SECRET_FILE`     | no       | `weekly_secret.json`     |
//! | `GITHUB_API_BASE` | no       | `https://api.github.com` |
//!
//! A `.env` file in the working directory is honored when present.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SECRET_FILE: &str = "weekly_secret.json";
const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token used to authenticate the outbound approval call. Needs
    /// permission to review pull requests in the target repositories.
    pub github_token: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Path of the persisted weekly secret record.
    pub secret_file: PathBuf,

    /// Base URL of the GitHub REST API. Overridden in tests and for
    /// GitHub Enterprise installations.
    pub github_api_base: Url,
}

impl Config {
    /// Loads configuration from the process environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Fails when `GITHUB_TOKEN` is unset or an optional variable is set to
    /// an unparseable value.
    pub fn from_env() -> Result<Config> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("GITHUB_TOKEN").ok(),
            env::var("PORT").ok(),
            env::var("SECRET_FILE").ok(),
            env::var("GITHUB_API_BASE").ok(),
        )
    }

    fn from_vars(
        github_token: Option<String>,
        port: Option<String>,
        secret_file: Option<String>,
        github_api_base: Option<String>,
    ) -> Result<Config> {
        let github_token = github_token.context(
            "GITHUB_TOKEN must be set to a token allowed to review pull requests",
        )?;

        let port = match port {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let secret_file = secret_file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRET_FILE));

        let github_api_base = match github_api_base {
            Some(raw) => Url::parse(&raw)
                .with_context(|| format!("GITHUB_API_BASE is not a valid URL: {raw:?}"))?,
            None => Url::parse(DEFAULT_GITHUB_API_BASE)
                .context("default GitHub API base URL failed to parse")?,
        };

        Ok(Config {
            github_token,
            port,
            secret_file,
            github_api_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> Option<String> {
        Some("ghp_test".to_string())
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        let config = Config::from_vars(token(), None, None, None).unwrap();

        assert_eq!(config.github_token, "ghp_test");
        assert_eq!(config.port, 8080);
        assert_eq!(config.secret_file, PathBuf::from("weekly_secret.json"));
        assert_eq!(config.github_api_base.as_str(), "https://api.github.com/");
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = Config::from_vars(None, None, None, None);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_vars(
            token(),
            Some("9000".to_string()),
            Some("/var/lib/pr/secret.json".to_string()),
            Some("https://github.example.com/api/v3".to_string()),
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.secret_file, PathBuf::from("/var/lib/pr/secret.json"));
        assert_eq!(
            config.github_api_base.as_str(),
            "https://github.example.com/api/v3"
        );
    }

    #[test]
    fn unparseable_port_is_an_error() {
        let result = Config::from_vars(token(), Some("eighty".to_string()), None, None);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("PORT"));
    }

    #[test]
    fn unparseable_api_base_is_an_error() {
        let result = Config::from_vars(token(), None, None, Some("not a url".to_string()));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("GITHUB_API_BASE"));
    }
}
