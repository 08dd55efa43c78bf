//! Output formatting for different formats.

use bulwark_core::{ScoreLabel, Status};
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Print `value` as JSON or YAML. Returns false for `Pretty`, which the
/// caller renders itself.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T) -> anyhow::Result<bool> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Pretty => return Ok(false),
    }
    Ok(true)
}

/// Status name in its traffic-light color.
pub fn status_colored(status: Status) -> ColoredString {
    match status {
        Status::Secure => "SECURE".green().bold(),
        Status::Warning => "WARNING".yellow().bold(),
        Status::Critical => "CRITICAL".red().bold(),
        Status::Scanning => "SCANNING".cyan(),
    }
}

/// Score with its display label, colored on the label's scale.
pub fn score_colored(score: u8, label: ScoreLabel) -> ColoredString {
    let text = format!("{score}% ({label})");
    match label {
        ScoreLabel::Excellent => text.bright_green(),
        ScoreLabel::Moderate => text.bright_yellow(),
        ScoreLabel::Poor => text.bright_red(),
    }
}
