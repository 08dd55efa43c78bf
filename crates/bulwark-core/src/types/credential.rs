//! Credential and secret-scoring types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;

/// Character used to mask stored secrets
pub const MASK_CHAR: char = '\u{25cf}';

/// Whether a score was computed from an actual secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing was entered; the report is a neutral placeholder
    NoInput,
    /// The secret was scored
    Assessed,
}

/// Output of the strength scorer. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Strength, 0..=100
    pub score: u8,
    /// Advice, in the order the checks ran
    pub feedback: Vec<String>,
    /// Classified status
    pub status: Status,
    /// Distinguishes "nothing entered" from "weak"
    pub verdict: Verdict,
}

impl ScoreReport {
    /// The neutral report for an empty secret
    #[must_use]
    pub const fn no_input() -> Self {
        Self {
            score: 0,
            feedback: Vec::new(),
            status: Status::Secure,
            verdict: Verdict::NoInput,
        }
    }

    /// Returns true if this report stands for "nothing entered"
    #[must_use]
    pub fn is_no_input(&self) -> bool {
        self.verdict == Verdict::NoInput
    }
}

/// A stored service/account pair with derived strength metrics.
///
/// The plaintext secret is never kept; only its masked form is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Opaque identifier
    pub id: String,
    /// Service label (e.g. "Banking")
    pub service: String,
    /// Account label (e.g. a username)
    pub account: String,
    /// One mask character per secret character
    pub masked: String,
    /// Strength, 0..=100
    pub strength: u8,
    /// Status derived from `strength`
    pub status: Status,
    /// When the secret was last set
    pub last_updated: DateTime<Utc>,
}

/// Mask a secret, keeping only its length.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    MASK_CHAR.to_string().repeat(secret.chars().count())
}
