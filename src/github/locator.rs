//! Pull request URL parsing.
//!
//! Callers submit a browser URL of the form
//! `https://github.com/{owner}/{repo}/pull/{number}`. [`PrLocator::parse`]
//! turns it into typed parts, rejecting anything that does not name a pull
//! request on github.com. Segments after the number (`/files`, a trailing
//! slash) and query strings are tolerated.

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::types::{PrNumber, RepoId};

/// Errors produced when a string is not a usable pull request URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    /// The string is not a parseable absolute URL.
    #[error("not a valid URL: {0}")]
    InvalidUrl(String),

    /// The URL points somewhere other than github.com.
    #[error("unexpected host {0:?}: only github.com pull request URLs are accepted")]
    UnexpectedHost(String),

    /// The URL path is not `/{{owner}}/{{repo}}/pull/{{number}}`.
    #[error("URL path does not name a pull request (expected /owner/repo/pull/number)")]
    NotAPullRequestUrl,

    /// The segment after `pull` is not a positive integer.
    #[error("pull request number must be a positive integer")]
    InvalidPrNumber,
}

/// The typed location of a pull request: repository plus number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLocator {
    repo: RepoId,
    number: PrNumber,
}

impl PrLocator {
    /// Parses a pull request URL into its repository and number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` when the string does not parse as a URL,
    /// `UnexpectedHost` when the host is not github.com,
    /// `NotAPullRequestUrl` when the path is not `/owner/repo/pull/<number>`,
    /// and `InvalidPrNumber` when the number segment is not a positive
    /// integer.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let parsed = Url::parse(input).map_err(|e| LocatorError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| LocatorError::InvalidUrl("URL has no host".to_string()))?;
        if !host.eq_ignore_ascii_case("github.com") {
            return Err(LocatorError::UnexpectedHost(host.to_string()));
        }

        let mut segments = parsed
            .path_segments()
            .ok_or(LocatorError::NotAPullRequestUrl)?;

        let owner = segments.next().ok_or(LocatorError::NotAPullRequestUrl)?;
        let repo = segments.next().ok_or(LocatorError::NotAPullRequestUrl)?;
        let marker = segments.next().ok_or(LocatorError::NotAPullRequestUrl)?;
        let number_segment = segments.next().ok_or(LocatorError::NotAPullRequestUrl)?;

        if owner.is_empty() || repo.is_empty() || marker != "pull" {
            return Err(LocatorError::NotAPullRequestUrl);
        }

        let number: u64 = number_segment
            .parse()
            .map_err(|_| LocatorError::InvalidPrNumber)?;
        if number == 0 {
            return Err(LocatorError::InvalidPrNumber);
        }

        Ok(PrLocator {
            repo: RepoId::new(owner, repo),
            number: PrNumber(number),
        })
    }

    /// The repository the pull request lives in.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// The pull request number.
    pub fn number(&self) -> PrNumber {
        self.number
    }
}

impl fmt::Display for PrLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.repo, self.number)
    }
}
