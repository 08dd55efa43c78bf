//! Credential audit over the vault.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use bulwark_core::{Findings, Result, Subsystem};

use super::Producer;
use crate::credentials::CredentialVault;

/// Audits the entries of a [`CredentialVault`].
#[derive(Debug, Clone)]
pub struct CredentialAudit {
    vault: Arc<CredentialVault>,
    delay: Duration,
}

impl CredentialAudit {
    /// Audit `vault`, answering after `delay`
    #[must_use]
    pub const fn new(vault: Arc<CredentialVault>, delay: Duration) -> Self {
        Self { vault, delay }
    }
}

#[async_trait]
impl Producer for CredentialAudit {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Credential
    }

    async fn produce(&self) -> Result<Findings> {
        tokio::time::sleep(self.delay).await;
        Ok(Findings::Credentials(self.vault.entries()))
    }
}
