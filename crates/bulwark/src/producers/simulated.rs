//! Fixed-data producers for the network and system subsystems.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

use bulwark_core::{Findings, NetworkDetails, Result, SecurityIssue, Subsystem, SystemInfo};

use super::{samples, Producer};

/// Network "scan" that returns a fixed list of networks after a delay.
///
/// Manual re-scans can be given their own list; by default they see the
/// same networks as a full scan.
#[derive(Debug, Clone)]
pub struct SimulatedNetworkScan {
    delay: Duration,
    networks: Vec<NetworkDetails>,
    rescan_networks: Option<Vec<NetworkDetails>>,
}

impl SimulatedNetworkScan {
    /// Producer returning `networks` after `delay`
    #[must_use]
    pub const fn new(delay: Duration, networks: Vec<NetworkDetails>) -> Self {
        Self {
            delay,
            networks,
            rescan_networks: None,
        }
    }

    /// Networks returned by [`Producer::rescan`] instead of the full-scan list
    #[must_use]
    pub fn with_rescan(mut self, networks: Vec<NetworkDetails>) -> Self {
        self.rescan_networks = Some(networks);
        self
    }

    /// Producer returning the built-in sample networks
    #[must_use]
    pub fn sample(delay: Duration) -> Self {
        Self::new(delay, samples::networks()).with_rescan(samples::rescanned_networks())
    }
}

#[async_trait]
impl Producer for SimulatedNetworkScan {
    fn subsystem(&self) -> Subsystem {
        Subsystem::Network
    }

    async fn produce(&self) -> Result<Findings> {
        tokio::time::sleep(self.delay).await;
        Ok(Findings::Networks(self.networks.clone()))
    }

    async fn rescan(&self) -> Result<Findings> {
        tokio::time::sleep(self.delay).await;
        let networks = self.rescan_networks.as_ref().unwrap_or(&self.networks);
        Ok(Findings::Networks(networks.clone()))
    }
}

/// System "scan" that returns a fixed list of issues, and optionally
/// resource metrics, after a delay.
#[derive(Debug, Clone)]
pub struct SimulatedSystemScan {
    delay: Duration,
    issues: Vec<SecurityIssue>,
    sample_metrics: bool,
}

impl SimulatedSystemScan {
    /// Producer returning `issues` and no metrics after `delay`
    #[must_use]
    pub const fn new(delay: Duration, issues: Vec<SecurityIssue>) -> Self {
        Self {
            delay,
            issues,
            sample_metrics: false,
        }
    }

    /// Also report freshly sampled [`SystemInfo`] on every run
    #[must_use]
    pub fn with_metrics(mut self) -> Self {
        self.sample_metrics = true;
        self
    }

    /// Producer returning the built-in sample issues and metrics
    #[must_use]
    pub fn sample(delay: Duration) -> Self {
        Self::new(delay, samples::issues()).with_metrics()
    }
}

#[async_trait]
impl Producer for SimulatedSystemScan {
    fn subsystem(&self) -> Subsystem {
        Subsystem::System
    }

    async fn produce(&self) -> Result<Findings> {
        tokio::time::sleep(self.delay).await;
        Ok(Findings::System {
            issues: self.issues.clone(),
            info: self.sample_metrics.then(samples::system_info),
        })
    }
}

/// Next reading of a live monitor: CPU drifts by up to 5 points (kept in
/// 5..=95), memory by up to 3 (kept in 20..=90). Everything else carries
/// over apart from the timestamp.
#[must_use]
pub fn refresh_metrics(info: &SystemInfo) -> SystemInfo {
    let mut rng = rand::rng();
    let cpu = i16::from(info.cpu_usage) + rng.random_range(-5..=5);
    let memory = i16::from(info.memory_usage) + rng.random_range(-3..=3);

    SystemInfo {
        cpu_usage: clamp_percent(cpu, 5, 95),
        memory_usage: clamp_percent(memory, 20, 90),
        last_updated: Utc::now(),
        ..info.clone()
    }
}

fn clamp_percent(value: i16, min: u8, max: u8) -> u8 {
    let clamped = value.clamp(i16::from(min), i16::from(max));
    // Within min..=max, so always fits
    u8::try_from(clamped).unwrap_or(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulwark_core::Status;

    #[test]
    fn sample_network_scan_is_critical() {
        let producer = SimulatedNetworkScan::sample(Duration::ZERO);
        let findings = tokio_test::block_on(producer.produce()).unwrap();

        assert_eq!(findings.subsystem(), Subsystem::Network);
        assert_eq!(findings.status(), Status::Critical);
        assert_eq!(findings.len(), 5);
    }

    #[test]
    fn sample_rescan_uses_second_list() {
        let producer = SimulatedNetworkScan::sample(Duration::ZERO);
        let findings = tokio_test::block_on(producer.rescan()).unwrap();

        assert_eq!(findings, Findings::Networks(samples::rescanned_networks()));
    }

    #[test]
    fn rescan_defaults_to_full_list() {
        let producer = SimulatedNetworkScan::new(Duration::ZERO, samples::networks());
        let findings = tokio_test::block_on(producer.rescan()).unwrap();

        assert_eq!(findings.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn system_scan_waits_for_its_delay() {
        let producer = SimulatedSystemScan::new(Duration::from_secs(3), Vec::new());
        let started = tokio::time::Instant::now();
        let findings = producer.produce().await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(findings.is_empty());
        assert_eq!(findings.status(), Status::Secure);
    }

    #[test]
    fn sample_system_scan_reports_metrics() {
        let producer = SimulatedSystemScan::sample(Duration::ZERO);
        let findings = tokio_test::block_on(producer.produce()).unwrap();

        match findings {
            Findings::System { issues, info } => {
                assert_eq!(issues.len(), 3);
                let info = info.unwrap();
                assert_eq!(info.disk_usage, 65);
                assert_eq!(info.status, Status::Warning);
            }
            other => panic!("unexpected findings: {other:?}"),
        }
    }

    #[test]
    fn refresh_keeps_metrics_in_bounds() {
        let mut info = samples::system_info();
        info.cpu_usage = 94;
        info.memory_usage = 21;

        for _ in 0..100 {
            info = refresh_metrics(&info);
            assert!((5..=95).contains(&info.cpu_usage));
            assert!((20..=90).contains(&info.memory_usage));
            assert_eq!(info.running_processes, 72);
        }
    }
}
