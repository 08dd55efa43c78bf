//! Score/status mappings.
//!
//! Three independent scales live here and are not meant to agree:
//!
//! - [`classify`]: 0-100 score to [`Status`] (70/40)
//! - [`status_to_score`]: [`Status`] to the points the aggregator averages
//! - [`label`]: 0-100 score to a display [`ScoreLabel`] (80/50)
//!
//! `classify` and `label` can disagree on the same score (75 is secure but
//! only moderate).

use bulwark_core::{ScoreLabel, Status};

/// Lowest score classified as [`Status::Secure`]
pub const SECURE_THRESHOLD: u8 = 70;
/// Lowest score classified as [`Status::Warning`]
pub const WARNING_THRESHOLD: u8 = 40;

/// Lowest score labelled [`ScoreLabel::Excellent`]
pub const EXCELLENT_THRESHOLD: u8 = 80;
/// Lowest score labelled [`ScoreLabel::Moderate`]
pub const MODERATE_THRESHOLD: u8 = 50;

/// Classify a 0-100 score.
#[must_use]
pub const fn classify(score: u8) -> Status {
    if score >= SECURE_THRESHOLD {
        Status::Secure
    } else if score >= WARNING_THRESHOLD {
        Status::Warning
    } else {
        Status::Critical
    }
}

/// Points a subsystem contributes to the overall score.
///
/// `Scanning` contributes nothing; it is excluded, not counted as zero.
#[must_use]
pub const fn status_to_score(status: Status) -> Option<u8> {
    match status {
        Status::Secure => Some(100),
        Status::Warning => Some(50),
        Status::Critical => Some(0),
        Status::Scanning => None,
    }
}

/// Display label for a 0-100 score.
#[must_use]
pub const fn label(score: u8) -> ScoreLabel {
    if score >= EXCELLENT_THRESHOLD {
        ScoreLabel::Excellent
    } else if score >= MODERATE_THRESHOLD {
        ScoreLabel::Moderate
    } else {
        ScoreLabel::Poor
    }
}
