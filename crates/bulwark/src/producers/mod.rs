//! External producers of subsystem findings.
//!
//! A producer is started once per scan cycle and eventually answers with
//! [`Findings`] for its subsystem. The built-in producers stand in for real
//! scanners; anything implementing [`Producer`] can replace them without
//! touching the aggregator.

pub mod audit;
pub mod samples;
pub mod simulated;

use async_trait::async_trait;
use std::sync::Arc;

use bulwark_core::{Findings, Result, Subsystem};

pub use audit::CredentialAudit;
pub use simulated::{SimulatedNetworkScan, SimulatedSystemScan};

/// Source of findings for one subsystem.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Subsystem this producer reports for
    fn subsystem(&self) -> Subsystem;

    /// Run once and return the findings.
    ///
    /// The status reported to the aggregator is the severity roll-up of the
    /// findings.
    async fn produce(&self) -> Result<Findings>;

    /// Run again for a single-subsystem re-scan. Defaults to [`Self::produce`].
    async fn rescan(&self) -> Result<Findings> {
        self.produce().await
    }
}

/// Shared, type-erased producer
pub type DynProducer = Arc<dyn Producer>;
