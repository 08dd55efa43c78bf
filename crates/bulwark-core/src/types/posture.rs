//! Posture state -- the consolidated view over all subsystems.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{Status, Subsystem};

/// Combined security posture of the device.
///
/// `overall_score` is only current while `is_scanning` is false; mid-scan it
/// still holds the previous cycle's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureState {
    /// Rounded mean of the subsystem scores (0..=100)
    pub overall_score: u8,
    /// Network subsystem status
    pub network_status: Status,
    /// Credential subsystem status
    pub credential_status: Status,
    /// Host subsystem status
    pub system_status: Status,
    /// True between `begin_scan` and `end_scan`
    pub is_scanning: bool,
    /// When the last full cycle ended
    pub last_scan_at: Option<DateTime<Utc>>,
}

impl Default for PostureState {
    fn default() -> Self {
        Self {
            overall_score: 0,
            network_status: Status::Scanning,
            credential_status: Status::Scanning,
            system_status: Status::Scanning,
            is_scanning: false,
            last_scan_at: None,
        }
    }
}

impl PostureState {
    /// Status of a single subsystem
    #[must_use]
    pub const fn status_of(&self, subsystem: Subsystem) -> Status {
        match subsystem {
            Subsystem::Network => self.network_status,
            Subsystem::Credential => self.credential_status,
            Subsystem::System => self.system_status,
        }
    }

    /// Mutable slot for a single subsystem's status
    pub fn status_slot(&mut self, subsystem: Subsystem) -> &mut Status {
        match subsystem {
            Subsystem::Network => &mut self.network_status,
            Subsystem::Credential => &mut self.credential_status,
            Subsystem::System => &mut self.system_status,
        }
    }

    /// All three statuses, in [`Subsystem::ALL`] order
    #[must_use]
    pub const fn statuses(&self) -> [Status; 3] {
        [self.network_status, self.credential_status, self.system_status]
    }

    /// Returns true when no subsystem is still `Scanning`
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.statuses().iter().all(Status::is_resolved)
    }
}

/// Ticket for one scan cycle.
///
/// Generations increase monotonically per aggregator; reports carry the
/// generation they were started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScanTicket {
    /// Cycle number, starting at 1
    pub generation: u64,
}

/// A producer's terminal answer for one subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemReport {
    /// Cycle the producer was started under
    pub generation: u64,
    /// Reporting subsystem
    pub subsystem: Subsystem,
    /// Reported status
    pub status: Status,
}
