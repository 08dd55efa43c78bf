//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Security posture at a glance
///
/// Scores passwords and combines network, credential and system checks
/// into one posture score. Use --explain on any command to learn how.
#[derive(Parser, Debug)]
#[command(name = "bulwark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "BULWARK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full posture scan
    Scan(ScanArgs),

    /// Score a password
    Check(CheckArgs),

    /// Generate a random password
    Generate(GenerateArgs),

    /// Manage credentials
    Credential(CredentialArgs),

    /// List and resolve host security issues
    Issues(IssuesArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Scan command
// ============================================================================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Seed the credential vault with sample entries
    #[arg(long)]
    pub sample: bool,
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Password to score (prompted without echo if omitted)
    pub secret: Option<String>,
}

// ============================================================================
// Generate command
// ============================================================================

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of characters
    #[arg(short, long, default_value_t = bulwark::scoring::generator::DEFAULT_LENGTH)]
    pub length: usize,

    /// Letters and digits only
    #[arg(long)]
    pub no_symbols: bool,
}

// ============================================================================
// Credential command
// ============================================================================

#[derive(Args, Debug)]
pub struct CredentialArgs {
    #[command(subcommand)]
    pub command: CredentialCommands,
}

#[derive(Subcommand, Debug)]
pub enum CredentialCommands {
    /// Add a credential (the secret is prompted for)
    Add {
        /// Service label (e.g., "Banking")
        #[arg(short, long)]
        service: String,

        /// Account label (e.g., a username)
        #[arg(short, long)]
        account: String,

        /// Read the secret from this environment variable instead of prompting
        #[arg(long, value_name = "VAR")]
        secret_env: Option<String>,
    },
}

// ============================================================================
// Issues command
// ============================================================================

#[derive(Args, Debug)]
pub struct IssuesArgs {
    /// Issue ids to resolve
    #[arg(short, long, value_name = "ID")]
    pub resolve: Vec<String>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., output_format, cycle_timeout_ms)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
