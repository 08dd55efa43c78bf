use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BulwarkError;

/// Security status of a single subsystem, or of a scored secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No findings worth acting on
    Secure,
    /// Findings that should be looked at
    Warning,
    /// Findings that need immediate attention
    Critical,
    /// Result not in yet; never a terminal answer
    Scanning,
}

impl Status {
    /// Terminal statuses, worst first
    pub const TERMINAL: [Self; 3] = [Self::Critical, Self::Warning, Self::Secure];

    /// Returns true once a producer has reported a terminal status
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Scanning)
    }

    /// Roll a set of statuses up to the most severe one.
    ///
    /// Any `Critical` wins, then any `Warning`; everything else (including an
    /// empty set) is `Secure`. `Scanning` entries carry no severity.
    pub fn worst_of<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut worst = Self::Secure;
        for status in statuses {
            match status {
                Self::Critical => return Self::Critical,
                Self::Warning => worst = Self::Warning,
                Self::Secure | Self::Scanning => {}
            }
        }
        worst
    }

    /// Lowercase name, as used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Secure => "secure",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Scanning => "scanning",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = BulwarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "secure" => Ok(Self::Secure),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            "scanning" => Ok(Self::Scanning),
            _ => Err(BulwarkError::InvalidStatus(s.to_string())),
        }
    }
}

/// One of the three independently scored domains of the posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    /// Wireless/wired networks around the device
    Network,
    /// Stored credentials
    Credential,
    /// Host integrity issues
    System,
}

impl Subsystem {
    /// All subsystems, in report order
    pub const ALL: [Self; 3] = [Self::Network, Self::Credential, Self::System];

    /// Lowercase name, as used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Credential => "credential",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subsystem {
    type Err = BulwarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "network" => Ok(Self::Network),
            "credential" | "password" => Ok(Self::Credential),
            "system" => Ok(Self::System),
            _ => Err(BulwarkError::InvalidSubsystem(s.to_string())),
        }
    }
}

/// Coarse display label for a 0-100 score.
///
/// Uses its own 80/50 scale, separate from the [`Status`] thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLabel {
    /// 80 and above
    Excellent,
    /// 50 to 79
    Moderate,
    /// Below 50
    Poor,
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}
