//! Outbound GitHub surface: pull request URL parsing and the approval call.

pub mod client;
pub mod error;
pub mod locator;

pub use client::ApprovalClient;
pub use error::ApprovalError;
pub use locator::{LocatorError, PrLocator};
