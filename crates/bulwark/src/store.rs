//! Shared posture state.
//!
//! Bundles the aggregator with the data producers deliver alongside their
//! statuses. Each piece sits behind its own mutex. The aggregator lock is
//! always taken first, and no lock is held across an `.await`.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use bulwark_core::{
    BulwarkError, CredentialEntry, Findings, NetworkDetails, PostureState, ScanTicket,
    SecurityIssue, Status, Subsystem, SubsystemReport, SystemInfo,
};

use crate::aggregator::PostureAggregator;
use crate::config::StaleReportPolicy;
use crate::credentials::CredentialVault;
use crate::issues::IssueRegister;
use crate::producers::simulated::refresh_metrics;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Aggregator plus the latest producer payloads.
#[derive(Debug, Default)]
pub struct PostureStore {
    aggregator: Mutex<PostureAggregator>,
    vault: Arc<CredentialVault>,
    issues: Mutex<IssueRegister>,
    networks: Mutex<Vec<NetworkDetails>>,
    system_info: Mutex<Option<SystemInfo>>,
}

impl PostureStore {
    /// Empty store with the given stale-report policy
    #[must_use]
    pub fn new(policy: StaleReportPolicy) -> Self {
        Self::with_vault(policy, Arc::new(CredentialVault::new()))
    }

    /// Store around an existing vault
    #[must_use]
    pub fn with_vault(policy: StaleReportPolicy, vault: Arc<CredentialVault>) -> Self {
        Self {
            aggregator: Mutex::new(PostureAggregator::with_policy(policy)),
            vault,
            issues: Mutex::default(),
            networks: Mutex::default(),
            system_info: Mutex::default(),
        }
    }

    /// Handle to the credential vault
    #[must_use]
    pub fn vault(&self) -> Arc<CredentialVault> {
        Arc::clone(&self.vault)
    }

    /// Copy of the posture state
    #[must_use]
    pub fn snapshot(&self) -> PostureState {
        lock(&self.aggregator).state().clone()
    }

    /// Overall score; stale while scanning
    #[must_use]
    pub fn overall_score(&self) -> u8 {
        lock(&self.aggregator).overall_score()
    }

    /// True between the start of a cycle and its timer firing
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        lock(&self.aggregator).is_scanning()
    }

    /// When the last cycle ended
    #[must_use]
    pub fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        lock(&self.aggregator).last_scan_at()
    }

    /// Status of one subsystem
    #[must_use]
    pub fn status(&self, subsystem: Subsystem) -> Status {
        lock(&self.aggregator).status(subsystem)
    }

    /// Start a full cycle
    pub fn begin_scan(&self) -> ScanTicket {
        let ticket = lock(&self.aggregator).begin_scan();
        info!(generation = ticket.generation, "scan started");
        ticket
    }

    /// Put one subsystem back to scanning within the current cycle
    pub fn begin_rescan(&self, subsystem: Subsystem) -> ScanTicket {
        let ticket = lock(&self.aggregator).begin_rescan(subsystem);
        info!(generation = ticket.generation, %subsystem, "rescan started");
        ticket
    }

    /// Close the cycle for `ticket` when its timer fires
    pub fn finish_cycle(&self, ticket: ScanTicket) -> bool {
        let mut aggregator = lock(&self.aggregator);
        let finished = aggregator.finish_cycle(ticket);
        if finished {
            info!(
                generation = ticket.generation,
                overall_score = aggregator.overall_score(),
                "scan finished"
            );
        }
        finished
    }

    /// Set a subsystem status directly
    pub fn resolve_subsystem(&self, which: Subsystem, status: Status) {
        lock(&self.aggregator).resolve_subsystem(which, status);
    }

    /// Record a producer's findings for the cycle in `ticket`.
    ///
    /// The payload is kept only if the aggregator accepts the report.
    pub fn record(&self, ticket: ScanTicket, findings: Findings) -> bool {
        let report = SubsystemReport {
            generation: ticket.generation,
            subsystem: findings.subsystem(),
            status: findings.status(),
        };

        let mut aggregator = lock(&self.aggregator);
        if !aggregator.accepts(report.generation) {
            return aggregator.apply_report(report);
        }

        match findings {
            Findings::Networks(networks) => *lock(&self.networks) = networks,
            Findings::System { issues, info } => {
                lock(&self.issues).replace(issues);
                if info.is_some() {
                    *lock(&self.system_info) = info;
                }
            }
            // The vault is the source of truth for credentials
            Findings::Credentials(_) => {}
        }
        debug!(
            subsystem = %report.subsystem,
            status = %report.status,
            generation = report.generation,
            "findings recorded"
        );
        aggregator.apply_report(report)
    }

    /// Record a failed producer. The subsystem resolves to `Critical`.
    pub fn record_failure(
        &self,
        ticket: ScanTicket,
        subsystem: Subsystem,
        error: &BulwarkError,
    ) -> bool {
        warn!(%subsystem, error = %error, "producer failed, marking subsystem critical");
        lock(&self.aggregator).apply_report(SubsystemReport {
            generation: ticket.generation,
            subsystem,
            status: Status::Critical,
        })
    }

    /// Add a credential and re-derive the credential subsystem status.
    pub fn add_credential(&self, service: &str, account: &str, secret: &str) -> CredentialEntry {
        let entry = self.vault.add(service, account, secret);
        let status = self.vault.status();
        self.resolve_subsystem(Subsystem::Credential, status);
        entry
    }

    /// Give a stored credential a new secret and re-derive the credential
    /// subsystem status. `None` if no entry has this id.
    pub fn replace_credential(&self, id: &str, secret: &str) -> Option<CredentialEntry> {
        let entry = self.vault.replace(id, secret)?;
        self.resolve_subsystem(Subsystem::Credential, self.vault.status());
        Some(entry)
    }

    /// Resolve an issue and re-derive the system subsystem status.
    ///
    /// Unknown ids return `None` and leave the posture as it was.
    pub fn resolve_issue(&self, id: &str) -> Option<Status> {
        let status = lock(&self.issues).resolve(id)?;
        self.resolve_subsystem(Subsystem::System, status);
        Some(status)
    }

    /// Take a new metrics reading off the last one.
    ///
    /// `None` until a system report carrying metrics has been recorded.
    pub fn refresh_system_info(&self) -> Option<SystemInfo> {
        let mut slot = lock(&self.system_info);
        let next = refresh_metrics(slot.as_ref()?);
        *slot = Some(next.clone());
        Some(next)
    }

    /// Stored credentials
    #[must_use]
    pub fn credentials(&self) -> Vec<CredentialEntry> {
        self.vault.entries()
    }

    /// Open issues
    #[must_use]
    pub fn issues(&self) -> Vec<SecurityIssue> {
        lock(&self.issues).issues().to_vec()
    }

    /// Networks from the last accepted network report
    #[must_use]
    pub fn networks(&self) -> Vec<NetworkDetails> {
        lock(&self.networks).clone()
    }

    /// Host metrics from the last system report that carried them
    #[must_use]
    pub fn system_info(&self) -> Option<SystemInfo> {
        lock(&self.system_info).clone()
    }
}
