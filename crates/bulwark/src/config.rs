//! Scan orchestration configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use bulwark_core::{BulwarkError, Result};

/// What to do with a report that arrives for a superseded scan cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleReportPolicy {
    /// Drop reports whose generation is not the current one
    #[default]
    Discard,
    /// Let late reports overwrite the current status
    Apply,
}

/// Timing and policy for scan cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Time after which a cycle is declared finished (ms).
    ///
    /// The cycle ends on this timer whether or not every producer reported.
    #[serde(default = "default_cycle_timeout")]
    pub cycle_timeout_ms: u64,

    /// Delay of the built-in network producer (ms).
    #[serde(default = "default_network_delay")]
    pub network_delay_ms: u64,

    /// Delay of the built-in credential audit (ms).
    #[serde(default = "default_credential_delay")]
    pub credential_delay_ms: u64,

    /// Delay of the built-in system producer (ms).
    #[serde(default = "default_system_delay")]
    pub system_delay_ms: u64,

    /// Handling of reports from superseded cycles.
    #[serde(default)]
    pub stale_reports: StaleReportPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            cycle_timeout_ms: default_cycle_timeout(),
            network_delay_ms: default_network_delay(),
            credential_delay_ms: default_credential_delay(),
            system_delay_ms: default_system_delay(),
            stale_reports: StaleReportPolicy::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Configuration with every delay set to zero except a 1 ms cycle timer.
    ///
    /// Handy for tests and for one-shot command line runs.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            cycle_timeout_ms: 1,
            network_delay_ms: 0,
            credential_delay_ms: 0,
            system_delay_ms: 0,
            stale_reports: StaleReportPolicy::default(),
        }
    }

    /// Check the configuration for values that would break a cycle.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_timeout_ms == 0 {
            return Err(BulwarkError::Config(
                "cycle_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Cycle timer as a [`Duration`]
    #[must_use]
    pub const fn cycle_timeout(&self) -> Duration {
        Duration::from_millis(self.cycle_timeout_ms)
    }

    /// Built-in network producer delay
    #[must_use]
    pub const fn network_delay(&self) -> Duration {
        Duration::from_millis(self.network_delay_ms)
    }

    /// Built-in credential audit delay
    #[must_use]
    pub const fn credential_delay(&self) -> Duration {
        Duration::from_millis(self.credential_delay_ms)
    }

    /// Built-in system producer delay
    #[must_use]
    pub const fn system_delay(&self) -> Duration {
        Duration::from_millis(self.system_delay_ms)
    }
}

// Default value functions for serde.
const fn default_cycle_timeout() -> u64 {
    3000
}

const fn default_network_delay() -> u64 {
    2500
}

const fn default_credential_delay() -> u64 {
    2000
}

const fn default_system_delay() -> u64 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.cycle_timeout(), Duration::from_secs(3));
        assert_eq!(config.network_delay_ms, 2500);
        assert_eq!(config.credential_delay_ms, 2000);
        assert_eq!(config.system_delay_ms, 3000);
        assert_eq!(config.stale_reports, StaleReportPolicy::Discard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: OrchestratorConfig =
            serde_json::from_str(r#"{"cycle_timeout_ms": 500, "stale_reports": "apply"}"#).unwrap();
        assert_eq!(config.cycle_timeout_ms, 500);
        assert_eq!(config.network_delay_ms, 2500);
        assert_eq!(config.stale_reports, StaleReportPolicy::Apply);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = OrchestratorConfig {
            cycle_timeout_ms: 0,
            ..OrchestratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(BulwarkError::Config(_))));
    }
}
