//! Core types for the bulwark security posture engine.
//!
//! This crate provides the foundational types shared by the engine and the CLI:
//!
//! - **Types**: [`Status`], [`Subsystem`], [`PostureState`], [`ScoreReport`],
//!   [`CredentialEntry`] and the producer payloads
//! - **Errors**: boundary validation failures via [`BulwarkError`]
//!
//! # Example
//!
//! ```rust
//! use bulwark_core::{Status, Subsystem};
//!
//! let status: Status = "warning".parse().unwrap();
//! assert_eq!(status, Status::Warning);
//! assert_eq!(Subsystem::ALL.len(), 3);
//! ```

#![doc(html_root_url = "https://docs.rs/bulwark-core/0.3.0")]

mod error;
pub mod types;

pub use error::{BulwarkError, Result};
pub use types::*;
