//! Weekly secret rotation.
//!
//! [`WeeklySecrets`] owns the stored record and hands out the secret for the
//! current week, generating a fresh one whenever the stored record is absent,
//! stale, or unreadable. All access is serialized behind a mutex so that two
//! concurrent requests arriving at a week rollover cannot both generate a
//! secret and silently discard one of them.

use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

use super::store::{SecretStore, SecretStoreError, StoredSecret};
use super::week::WeekId;

/// Errors that can occur resolving the current secret.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The store could not persist a freshly generated secret.
    #[error("secret store error: {0}")]
    Store(#[from] SecretStoreError),
}

/// Result type for secret service operations.
pub type Result<T> = std::result::Result<T, SecretError>;

/// The rotating weekly secret, backed by a [`SecretStore`].
pub struct WeeklySecrets {
    store: Mutex<Box<dyn SecretStore>>,
}

impl WeeklySecrets {
    pub fn new(store: impl SecretStore + 'static) -> Self {
        WeeklySecrets {
            store: Mutex::new(Box::new(store)),
        }
    }

    /// Returns the secret record for the current week, rotating if needed.
    pub fn current(&self) -> Result<StoredSecret> {
        self.for_week(WeekId::current())
    }

    /// Returns the secret record for the given week, rotating if needed.
    ///
    /// The stored record is returned unchanged when its week matches. A
    /// missing or stale record is replaced by a freshly generated one; an
    /// unreadable record is treated the same way, since the only recovery
    /// is to hand out a new secret. A failed save is an error: callers must
    /// never receive a secret that was not persisted first.
    pub fn for_week(&self, week: WeekId) -> Result<StoredSecret> {
        // A panicked writer cannot leave a half-written record behind (the
        // file swap is atomic), so a poisoned lock is safe to take over.
        let mut store = self
            .store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        match store.load() {
            Ok(Some(record)) if record.week == week => return Ok(record),
            Ok(Some(record)) => {
                debug!(
                    stored_week = %record.week,
                    current_week = %week,
                    "stored secret is stale, rotating"
                );
            }
            Ok(None) => {
                debug!(current_week = %week, "no stored secret, generating one");
            }
            Err(e) => {
                warn!(
                    error = %e,
                    current_week = %week,
                    "stored secret is unreadable, regenerating"
                );
            }
        }

        let record = StoredSecret {
            week,
            secret: generate_secret(),
        };
        store.save(&record)?;

        Ok(record)
    }
}

/// Generates a fresh secret: 16 bytes of OS randomness, base64 URL-safe
/// without padding (22 characters).
fn generate_secret() -> String {
    use base64::Engine;
    use rand::RngCore;

    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
