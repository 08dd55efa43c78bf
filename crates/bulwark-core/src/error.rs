use thiserror::Error;

use crate::types::Subsystem;

/// Result type alias for bulwark operations
pub type Result<T> = std::result::Result<T, BulwarkError>;

/// Errors that can occur at the bulwark API boundary
#[derive(Error, Debug)]
pub enum BulwarkError {
    /// Text that is not one of `secure|warning|critical|scanning`
    #[error("invalid status: {0:?} (expected secure, warning, critical or scanning)")]
    InvalidStatus(String),

    /// Text that is not one of `network|credential|system`
    #[error("invalid subsystem: {0:?} (expected network, credential or system)")]
    InvalidSubsystem(String),

    /// A length outside the accepted range
    #[error("invalid length {length}: must be between {min} and {max}")]
    InvalidLength {
        /// Requested length
        length: usize,
        /// Smallest accepted length
        min: usize,
        /// Largest accepted length
        max: usize,
    },

    /// An external producer failed to deliver its findings
    #[error("{subsystem} producer failed: {message}")]
    Producer {
        /// Subsystem the producer reports for
        subsystem: Subsystem,
        /// Failure description
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl BulwarkError {
    /// Returns true if the error was caused by caller-supplied input
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidStatus(_) | Self::InvalidSubsystem(_) | Self::InvalidLength { .. }
        )
    }

    /// Shorthand for a producer failure
    pub fn producer(subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self::Producer {
            subsystem,
            message: message.into(),
        }
    }
}
