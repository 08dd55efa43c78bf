//! `bulwark config` - CLI configuration management.

use anyhow::Result;
use bulwark::StaleReportPolicy;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{emit, OutputFormat};

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    if emit(ctx.output_format, config)? {
        return Ok(());
    }

    let orch = &config.orchestrator;
    println!("{}", "Current Configuration:".bold());
    println!("  {}", ctx.config_path.display().to_string().dimmed());
    println!();
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or(OutputFormat::Pretty)
    );
    println!("  {} {}", "show_tips:".bold(), config.show_tips);
    println!("  {} {}", "explain_by_default:".bold(), config.explain_by_default);
    println!();
    println!("{}", "Scan Cycle:".bold());
    println!("  {} {}", "cycle_timeout_ms:".bold(), orch.cycle_timeout_ms);
    println!("  {} {}", "network_delay_ms:".bold(), orch.network_delay_ms);
    println!("  {} {}", "credential_delay_ms:".bold(), orch.credential_delay_ms);
    println!("  {} {}", "system_delay_ms:".bold(), orch.system_delay_ms);
    println!(
        "  {} {}",
        "stale_reports:".bold(),
        policy_name(orch.stale_reports)
    );

    Ok(())
}

fn set_config(ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config;
    let orch = &mut config.orchestrator;

    match key {
        "output_format" | "output" => config.output_format = Some(value.parse()?),
        "show_tips" => config.show_tips = value.parse()?,
        "explain_by_default" | "explain" => config.explain_by_default = value.parse()?,
        "cycle_timeout_ms" => orch.cycle_timeout_ms = value.parse()?,
        "network_delay_ms" => orch.network_delay_ms = value.parse()?,
        "credential_delay_ms" => orch.credential_delay_ms = value.parse()?,
        "system_delay_ms" => orch.system_delay_ms = value.parse()?,
        "stale_reports" => orch.stale_reports = parse_policy(value)?,
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 output_format       - Default output format (pretty/json/yaml)\n  \
                 show_tips           - Show helpful tips (true/false)\n  \
                 explain_by_default  - Always explain commands (true/false)\n  \
                 cycle_timeout_ms    - Scan cycle timer in milliseconds\n  \
                 network_delay_ms    - Network check duration\n  \
                 credential_delay_ms - Credential audit duration\n  \
                 system_delay_ms     - System check duration\n  \
                 stale_reports       - Late reports from old cycles (discard/apply)",
                key
            );
        }
    }

    config.orchestrator.validate()?;
    config.save(&ctx.config_path)?;

    if ctx.output_format == OutputFormat::Pretty {
        println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    }
    Ok(())
}

fn parse_policy(value: &str) -> Result<StaleReportPolicy> {
    match value.to_lowercase().as_str() {
        "discard" => Ok(StaleReportPolicy::Discard),
        "apply" => Ok(StaleReportPolicy::Apply),
        _ => anyhow::bail!("Unknown stale report policy: {value} (expected discard or apply)"),
    }
}

const fn policy_name(policy: StaleReportPolicy) -> &'static str {
    match policy {
        StaleReportPolicy::Discard => "discard",
        StaleReportPolicy::Apply => "apply",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names() {
        assert_eq!(parse_policy("Apply").unwrap(), StaleReportPolicy::Apply);
        assert_eq!(parse_policy("discard").unwrap(), StaleReportPolicy::Discard);
        assert!(parse_policy("keep").is_err());
    }
}
