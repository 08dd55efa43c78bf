//! Producer payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credential::CredentialEntry;
use super::status::{Status, Subsystem};

/// A network seen during a network scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDetails {
    /// Network name
    pub ssid: String,
    /// Encryption scheme (e.g. "WPA3", "Open")
    pub encryption: String,
    /// Signal strength, 0..=100
    pub signal: u8,
    /// Assessed status
    pub status: Status,
}

/// A host integrity issue reported by a system scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityIssue {
    /// Identifier used to resolve the issue
    pub id: String,
    /// Short title
    pub title: String,
    /// What was found and what to do about it
    pub description: String,
    /// Severity (a terminal status)
    pub severity: Status,
    /// When the issue was detected
    pub detected: DateTime<Utc>,
}

/// Host resource metrics sampled by a system scan.
///
/// Percentages are whole numbers in `0..=100`. `status` is the monitor's own
/// health verdict and does not feed the system subsystem status, which comes
/// from the open issues alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// CPU load (%)
    pub cpu_usage: u8,
    /// Memory in use (%)
    pub memory_usage: u8,
    /// Disk space in use (%)
    pub disk_usage: u8,
    /// Battery charge (%)
    pub battery_level: u8,
    /// Temperature in degrees Celsius
    pub temperature: u8,
    /// Processes running at sampling time
    pub running_processes: u32,
    /// Processes flagged as suspicious
    pub suspicious_processes: u32,
    /// When the metrics were sampled
    pub last_updated: DateTime<Utc>,
    /// Health verdict of the monitor
    pub status: Status,
}

/// Domain payload returned alongside a producer's status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Findings {
    /// Networks discovered by a network scan
    Networks(Vec<NetworkDetails>),
    /// Entries covered by a credential audit
    Credentials(Vec<CredentialEntry>),
    /// Issues and metrics from a system scan
    System {
        /// Open host issues
        issues: Vec<SecurityIssue>,
        /// Resource metrics, if the scan sampled any
        info: Option<SystemInfo>,
    },
}

impl Findings {
    /// Subsystem these findings belong to
    #[must_use]
    pub const fn subsystem(&self) -> Subsystem {
        match self {
            Self::Networks(_) => Subsystem::Network,
            Self::Credentials(_) => Subsystem::Credential,
            Self::System { .. } => Subsystem::System,
        }
    }

    /// Severity roll-up of the findings
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Networks(items) => Status::worst_of(items.iter().map(|n| n.status)),
            Self::Credentials(items) => Status::worst_of(items.iter().map(|c| c.status)),
            Self::System { issues, .. } => Status::worst_of(issues.iter().map(|i| i.severity)),
        }
    }

    /// Number of networks, entries or issues found
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Networks(items) => items.len(),
            Self::Credentials(items) => items.len(),
            Self::System { issues, .. } => issues.len(),
        }
    }

    /// Returns true if nothing was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
