//! Command implementations.

pub mod check;
pub mod config;
pub mod credential;
pub mod generate;
pub mod issues;
pub mod scan;

use std::path::PathBuf;

use bulwark::Posture;
use colored::Colorize;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Whether to print tips after pretty output
    pub show_tips: bool,

    /// Where the config was loaded from
    pub config_path: PathBuf,

    /// Loaded configuration
    pub config: Config,
}

impl Context {
    /// Build a posture engine from the configured orchestrator settings.
    pub fn posture(&self) -> anyhow::Result<Posture> {
        Ok(Posture::new(self.config.orchestrator.clone())?)
    }

    /// Whether the output is rendered for humans
    pub fn is_pretty(&self) -> bool {
        self.output_format == OutputFormat::Pretty
    }

    /// Print a dimmed tip, if tips are enabled and output is pretty.
    pub fn tip(&self, text: &str) {
        if self.show_tips && self.is_pretty() {
            println!();
            println!("{} {}", "Tip:".dimmed().bold(), text.dimmed());
        }
    }
}
