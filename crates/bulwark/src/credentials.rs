//! In-memory credential vault.
//!
//! Secrets are scored on the way in and then dropped; entries keep only the
//! masked form and the derived strength.

use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use bulwark_core::{mask_secret, CredentialEntry, Status};

use crate::scoring::score;

/// Credential store shared between the posture facade and the credential
/// audit producer.
#[derive(Debug, Default)]
pub struct CredentialVault {
    entries: Mutex<Vec<CredentialEntry>>,
}

impl CredentialVault {
    /// Empty vault
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Vault pre-filled with already-assessed entries
    #[must_use]
    pub fn with_entries(entries: Vec<CredentialEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CredentialEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Score `secret`, store the entry and return it.
    pub fn add(&self, service: &str, account: &str, secret: &str) -> CredentialEntry {
        let report = score(secret);
        let entry = CredentialEntry {
            id: Uuid::new_v4().to_string(),
            service: service.to_string(),
            account: account.to_string(),
            masked: mask_secret(secret),
            strength: report.score,
            status: report.status,
            last_updated: Utc::now(),
        };
        debug!(id = %entry.id, service, strength = entry.strength, "credential added");
        self.lock().push(entry.clone());
        entry
    }

    /// Replace the secret of an existing entry. Returns the new entry, or
    /// `None` if `id` is unknown.
    pub fn replace(&self, id: &str, secret: &str) -> Option<CredentialEntry> {
        let report = score(secret);
        let mut entries = self.lock();
        let slot = entries.iter_mut().find(|e| e.id == id)?;
        *slot = CredentialEntry {
            masked: mask_secret(secret),
            strength: report.score,
            status: report.status,
            last_updated: Utc::now(),
            ..slot.clone()
        };
        Some(slot.clone())
    }

    /// All entries, in insertion order
    #[must_use]
    pub fn entries(&self) -> Vec<CredentialEntry> {
        self.lock().clone()
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if the vault holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Severity roll-up over every entry
    #[must_use]
    pub fn status(&self) -> Status {
        Status::worst_of(self.lock().iter().map(|e| e.status))
    }
}
