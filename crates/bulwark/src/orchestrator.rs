//! Scan orchestration.
//!
//! A cycle starts every producer and a cycle timer at once. Producers report
//! back independently; the timer closes the cycle whether or not they have.
//! Nothing is cancelled: a producer that outlives its cycle still reports,
//! and the stale-report policy decides whether that report counts.

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use bulwark_core::{BulwarkError, ScanTicket, Subsystem};

use crate::config::OrchestratorConfig;
use crate::producers::{DynProducer, Producer};
use crate::store::PostureStore;

/// Handle to the tasks spawned for one cycle (or one rescan).
///
/// Dropping it does not stop anything.
#[derive(Debug)]
pub struct ScanCycle {
    ticket: ScanTicket,
    tasks: Vec<JoinHandle<()>>,
}

impl ScanCycle {
    /// Ticket the tasks were started under
    #[must_use]
    pub const fn ticket(&self) -> ScanTicket {
        self.ticket
    }

    /// Wait until every producer and the cycle timer have fired.
    pub async fn wait(self) -> ScanTicket {
        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                warn!(error = %e, "scan task failed");
            }
        }
        self.ticket
    }
}

/// Drives scan cycles across the registered producers.
pub struct ScanOrchestrator {
    store: Arc<PostureStore>,
    producers: Vec<DynProducer>,
    config: OrchestratorConfig,
}

impl std::fmt::Debug for ScanOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOrchestrator")
            .field(
                "producers",
                &self.producers.iter().map(|p| p.subsystem()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ScanOrchestrator {
    /// Orchestrator with no producers
    #[must_use]
    pub const fn new(store: Arc<PostureStore>, config: OrchestratorConfig) -> Self {
        Self {
            store,
            producers: Vec::new(),
            config,
        }
    }

    /// Register a producer
    #[must_use]
    pub fn with_producer(mut self, producer: impl Producer + 'static) -> Self {
        self.producers.push(Arc::new(producer));
        self
    }

    /// Register an already shared producer
    #[must_use]
    pub fn with_shared_producer(mut self, producer: DynProducer) -> Self {
        self.producers.push(producer);
        self
    }

    /// The store cycles report into
    #[must_use]
    pub const fn store(&self) -> &Arc<PostureStore> {
        &self.store
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Start a full cycle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn begin_scan(&self) -> ScanCycle {
        let ticket = self.store.begin_scan();

        let mut tasks: Vec<JoinHandle<()>> = self
            .producers
            .iter()
            .map(|producer| self.spawn_producer(Arc::clone(producer), ticket, false))
            .collect();

        let store = Arc::clone(&self.store);
        let timeout = self.config.cycle_timeout();
        tasks.push(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            store.finish_cycle(ticket);
        }));

        ScanCycle { ticket, tasks }
    }

    /// Re-run the producers of a single subsystem within the current cycle.
    ///
    /// Returns `None` if no producer is registered for `subsystem`.
    pub fn rescan(&self, subsystem: Subsystem) -> Option<ScanCycle> {
        let producers: Vec<DynProducer> = self
            .producers
            .iter()
            .filter(|p| p.subsystem() == subsystem)
            .cloned()
            .collect();
        if producers.is_empty() {
            debug!(%subsystem, "no producer registered for rescan");
            return None;
        }

        let ticket = self.store.begin_rescan(subsystem);
        let tasks = producers
            .into_iter()
            .map(|producer| self.spawn_producer(producer, ticket, true))
            .collect();
        Some(ScanCycle { ticket, tasks })
    }

    fn spawn_producer(
        &self,
        producer: DynProducer,
        ticket: ScanTicket,
        rescan: bool,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let subsystem = producer.subsystem();
            let outcome = if rescan {
                producer.rescan().await
            } else {
                producer.produce().await
            };
            match outcome {
                Ok(findings) if findings.subsystem() == subsystem => {
                    store.record(ticket, findings);
                }
                Ok(findings) => {
                    let error = BulwarkError::producer(
                        subsystem,
                        format!("returned {} findings", findings.subsystem()),
                    );
                    store.record_failure(ticket, subsystem, &error);
                }
                Err(error) => {
                    store.record_failure(ticket, subsystem, &error);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaleReportPolicy;
    use crate::producers::{samples, SimulatedNetworkScan, SimulatedSystemScan};
    use async_trait::async_trait;
    use bulwark_core::{Findings, NetworkDetails, Result, Status};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Network producer whose first run is slow and critical, later runs
    /// fast and secure.
    struct SlowThenFast {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Producer for SlowThenFast {
        fn subsystem(&self) -> Subsystem {
            Subsystem::Network
        }

        async fn produce(&self) -> Result<Findings> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, status) = if call == 0 {
                (Duration::from_millis(900), Status::Critical)
            } else {
                (Duration::from_millis(100), Status::Secure)
            };
            tokio::time::sleep(delay).await;
            Ok(Findings::Networks(vec![NetworkDetails {
                ssid: format!("run-{call}"),
                encryption: "WPA3".into(),
                signal: 70,
                status,
            }]))
        }
    }

    struct Broken;

    #[async_trait]
    impl Producer for Broken {
        fn subsystem(&self) -> Subsystem {
            Subsystem::System
        }

        async fn produce(&self) -> Result<Findings> {
            Err(BulwarkError::producer(Subsystem::System, "sensor offline"))
        }
    }

    fn orchestrator(policy: StaleReportPolicy) -> ScanOrchestrator {
        let config = OrchestratorConfig {
            cycle_timeout_ms: 1000,
            stale_reports: policy,
            ..OrchestratorConfig::default()
        };
        ScanOrchestrator::new(Arc::new(PostureStore::new(policy)), config)
    }

    #[tokio::test(start_paused = true)]
    async fn full_cycle_resolves_everything() {
        let orch = orchestrator(StaleReportPolicy::Discard)
            .with_producer(SimulatedNetworkScan::new(Duration::from_millis(250), Vec::new()))
            .with_producer(SimulatedSystemScan::sample(Duration::from_millis(300)));
        let store = Arc::clone(orch.store());
        store.resolve_subsystem(Subsystem::Credential, Status::Secure);

        let cycle = orch.begin_scan();
        assert!(store.is_scanning());
        cycle.wait().await;

        let state = store.snapshot();
        assert!(!state.is_scanning);
        assert!(state.last_scan_at.is_some());
        // network secure, credential scanning (reset by begin_scan) -> no score yet
        assert_eq!(state.network_status, Status::Secure);
        assert_eq!(state.system_status, Status::Critical);
        assert_eq!(state.credential_status, Status::Scanning);
        assert_eq!(store.issues().len(), samples::issues().len());
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_ends_on_timer_even_if_producer_is_slow() {
        let orch = orchestrator(StaleReportPolicy::Discard).with_producer(
            SimulatedNetworkScan::new(Duration::from_secs(5), Vec::new()),
        );
        let store = Arc::clone(orch.store());
        let _cycle = orch.begin_scan();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!store.is_scanning());
        assert_eq!(store.status(Subsystem::Network), Status::Scanning);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(store.status(Subsystem::Network), Status::Secure);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_reports_are_discarded() {
        let orch = orchestrator(StaleReportPolicy::Discard).with_producer(SlowThenFast {
            calls: AtomicUsize::new(0),
        });
        let store = Arc::clone(orch.store());

        let first = orch.begin_scan();
        let second = orch.begin_scan();
        second.wait().await;
        first.wait().await;

        assert_eq!(store.status(Subsystem::Network), Status::Secure);
        assert_eq!(store.networks()[0].ssid, "run-1");
    }

    #[tokio::test(start_paused = true)]
    async fn apply_policy_lets_late_reports_win() {
        let orch = orchestrator(StaleReportPolicy::Apply).with_producer(SlowThenFast {
            calls: AtomicUsize::new(0),
        });
        let store = Arc::clone(orch.store());

        let first = orch.begin_scan();
        let second = orch.begin_scan();
        second.wait().await;
        first.wait().await;

        assert_eq!(store.status(Subsystem::Network), Status::Critical);
        assert_eq!(store.networks()[0].ssid, "run-0");
    }

    #[tokio::test(start_paused = true)]
    async fn failing_producer_resolves_critical() {
        let orch = orchestrator(StaleReportPolicy::Discard).with_producer(Broken);
        let store = Arc::clone(orch.store());

        orch.begin_scan().wait().await;
        assert_eq!(store.status(Subsystem::System), Status::Critical);
    }

    #[tokio::test(start_paused = true)]
    async fn rescan_touches_one_subsystem() {
        let orch = orchestrator(StaleReportPolicy::Discard)
            .with_producer(SimulatedNetworkScan::sample(Duration::from_millis(100)))
            .with_producer(SimulatedSystemScan::new(Duration::ZERO, Vec::new()));
        let store = Arc::clone(orch.store());
        orch.begin_scan().wait().await;
        assert_eq!(store.status(Subsystem::System), Status::Secure);

        let rescan = orch.rescan(Subsystem::Network).unwrap();
        assert_eq!(store.status(Subsystem::Network), Status::Scanning);
        assert_eq!(store.status(Subsystem::System), Status::Secure);
        assert!(!store.is_scanning());
        rescan.wait().await;

        assert_eq!(store.status(Subsystem::Network), Status::Critical);
        assert_eq!(store.networks(), samples::rescanned_networks());
        assert!(orch.rescan(Subsystem::Credential).is_none());
    }
}
