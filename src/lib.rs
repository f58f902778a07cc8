//! PR Approver - an HTTP relay that approves GitHub pull requests, gated by
//! a weekly rotating shared secret.
//!
//! This library provides the secret rotation, URL parsing, and GitHub client
//! logic behind the server binary.

pub mod config;
pub mod github;
pub mod secret;
pub mod server;
pub mod types;
