//! # bulwark-cli
//!
//! Command-line interface for the bulwark security posture engine.
//!
//! ## Features
//!
//! - **Posture scans**: run a full cycle and see the combined score
//! - **Secret checks**: strength score, status and advice for a password
//! - **Generator**: random passwords, scored on the spot
//! - **Issues**: review and resolve host issues
//! - **Educational mode**: `--explain` describes what a command does
//! - **Multiple output formats**: pretty tables, JSON, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;
