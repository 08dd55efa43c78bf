//! The posture facade: the API the UI or automation layer talks to.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use bulwark_core::{
    CredentialEntry, NetworkDetails, PostureState, Result, ScoreReport, SecurityIssue, Status,
    Subsystem, SystemInfo,
};

use crate::config::OrchestratorConfig;
use crate::credentials::CredentialVault;
use crate::orchestrator::{ScanCycle, ScanOrchestrator};
use crate::producers::{CredentialAudit, DynProducer, SimulatedNetworkScan, SimulatedSystemScan};
use crate::scoring;
use crate::store::PostureStore;

/// Owns the posture state and the orchestrator that refreshes it.
#[derive(Debug)]
pub struct Posture {
    store: Arc<PostureStore>,
    orchestrator: ScanOrchestrator,
}

impl Posture {
    /// Posture backed by the built-in simulated producers and an empty vault.
    pub fn new(config: OrchestratorConfig) -> Result<Self> {
        Self::with_vault(config, CredentialVault::new())
    }

    /// Posture backed by the built-in simulated producers and `vault`.
    pub fn with_vault(config: OrchestratorConfig, vault: CredentialVault) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(PostureStore::with_vault(config.stale_reports, Arc::new(vault)));
        let orchestrator = ScanOrchestrator::new(Arc::clone(&store), config.clone())
            .with_producer(SimulatedNetworkScan::sample(config.network_delay()))
            .with_producer(CredentialAudit::new(store.vault(), config.credential_delay()))
            .with_producer(SimulatedSystemScan::sample(config.system_delay()));
        Ok(Self {
            store,
            orchestrator,
        })
    }

    /// Posture backed by caller-supplied producers.
    pub fn with_producers(config: OrchestratorConfig, producers: Vec<DynProducer>) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(PostureStore::new(config.stale_reports));
        let orchestrator = producers.into_iter().fold(
            ScanOrchestrator::new(Arc::clone(&store), config),
            ScanOrchestrator::with_shared_producer,
        );
        Ok(Self {
            store,
            orchestrator,
        })
    }

    /// Start a full refresh. Must be called from within a tokio runtime.
    pub fn begin_scan(&self) -> ScanCycle {
        self.orchestrator.begin_scan()
    }

    /// Refresh a single subsystem
    pub fn rescan(&self, subsystem: Subsystem) -> Option<ScanCycle> {
        self.orchestrator.rescan(subsystem)
    }

    /// Set a subsystem status directly (producer-facing)
    pub fn resolve_subsystem(&self, which: Subsystem, status: Status) {
        self.store.resolve_subsystem(which, status);
    }

    /// Overall score; check [`Self::is_scanning`] before trusting it
    #[must_use]
    pub fn overall_score(&self) -> u8 {
        self.store.overall_score()
    }

    /// True while a cycle is running
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.store.is_scanning()
    }

    /// When the last cycle ended
    #[must_use]
    pub fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        self.store.last_scan_at()
    }

    /// Copy of the whole state
    #[must_use]
    pub fn snapshot(&self) -> PostureState {
        self.store.snapshot()
    }

    /// Score a secret without storing it
    #[must_use]
    pub fn score(secret: &str) -> ScoreReport {
        scoring::score(secret)
    }

    /// Store a credential; the secret itself is not kept.
    pub fn add_credential(&self, service: &str, account: &str, secret: &str) -> CredentialEntry {
        self.store.add_credential(service, account, secret)
    }

    /// Rotate a stored credential to a new secret. `None` for unknown ids.
    pub fn replace_credential(&self, id: &str, secret: &str) -> Option<CredentialEntry> {
        self.store.replace_credential(id, secret)
    }

    /// Resolve an open issue and return the re-derived system status.
    ///
    /// `None` if no open issue has this id; nothing changes in that case.
    pub fn resolve_issue(&self, id: &str) -> Option<Status> {
        self.store.resolve_issue(id)
    }

    /// Take a fresh host metrics reading
    pub fn refresh_system_info(&self) -> Option<SystemInfo> {
        self.store.refresh_system_info()
    }

    /// Stored credentials
    #[must_use]
    pub fn credentials(&self) -> Vec<CredentialEntry> {
        self.store.credentials()
    }

    /// Open issues
    #[must_use]
    pub fn issues(&self) -> Vec<SecurityIssue> {
        self.store.issues()
    }

    /// Networks from the last network report
    #[must_use]
    pub fn networks(&self) -> Vec<NetworkDetails> {
        self.store.networks()
    }

    /// Host metrics from the last system report
    #[must_use]
    pub fn system_info(&self) -> Option<SystemInfo> {
        self.store.system_info()
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        self.orchestrator.config()
    }
}
