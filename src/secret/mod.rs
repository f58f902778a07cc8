//! The weekly rotating shared secret: week identifiers, persistence, rotation.

pub mod service;
pub mod store;
pub mod week;

pub use service::{SecretError, WeeklySecrets};
pub use store::{FileSecretStore, MemorySecretStore, SecretStore, SecretStoreError, StoredSecret};
pub use week::WeekId;
