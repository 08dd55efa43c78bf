//! # bulwark
//!
//! Security posture engine: combines three independently scored
//! subsystems (network, credential, system) into one status and score.
//!
//! ## Components
//!
//! - **Scoring** -- [`scoring::score`] rates a secret; [`classify`] maps
//!   scores to statuses and display labels
//! - **Aggregation** -- [`PostureAggregator`] holds the subsystem statuses
//!   and derives the overall score once all three are resolved
//! - **Orchestration** -- [`ScanOrchestrator`] starts every [`Producer`]
//!   and a cycle timer, and routes reports back to the aggregator
//! - **Facade** -- [`Posture`] bundles it all behind one API
//!
//! ## Data Flow
//!
//! ```text
//! Posture::begin_scan()
//!   -> aggregator: all subsystems scanning, generation += 1
//!   -> spawn producers + cycle timer
//! producer finishes
//!   -> Findings -> severity roll-up -> SubsystemReport { generation }
//!   -> aggregator (stale generations discarded) -> overall score
//! cycle timer fires
//!   -> is_scanning = false, last_scan_at = now
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use bulwark::{OrchestratorConfig, Posture};
//!
//! # async fn demo() -> bulwark::Result<()> {
//! let posture = Posture::new(OrchestratorConfig::default())?;
//! posture.begin_scan().wait().await;
//! println!("score: {}", posture.overall_score());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod classify;
pub mod config;
pub mod credentials;
pub mod issues;
pub mod orchestrator;
pub mod posture;
pub mod producers;
pub mod scoring;
pub mod store;

pub use aggregator::PostureAggregator;
pub use bulwark_core::{BulwarkError, Result};
pub use config::{OrchestratorConfig, StaleReportPolicy};
pub use credentials::CredentialVault;
pub use issues::IssueRegister;
pub use orchestrator::{ScanCycle, ScanOrchestrator};
pub use posture::Posture;
pub use producers::{DynProducer, Producer};
pub use store::PostureStore;
