//! Core domain types for the approval relay.

pub mod ids;

// Re-export commonly used types at the module level
pub use ids::{PrNumber, RepoId};
