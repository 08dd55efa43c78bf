//! `bulwark scan` - Run a full posture scan.

use anyhow::Result;
use bulwark::classify::label;
use bulwark::producers::samples;
use bulwark::{CredentialVault, Posture};
use bulwark_core::{
    CredentialEntry, NetworkDetails, PostureState, ScoreLabel, SecurityIssue, Subsystem,
    SystemInfo,
};
use chrono::Local;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use super::Context;
use crate::cli::args::ScanArgs;
use crate::education::Explain;
use crate::output::{emit, score_colored, status_colored};

/// How often the spinner re-reads the posture
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Serialize)]
struct ScanOutput {
    posture: PostureState,
    label: ScoreLabel,
    networks: Vec<NetworkDetails>,
    credentials: Vec<CredentialEntry>,
    issues: Vec<SecurityIssue>,
    system_info: Option<SystemInfo>,
}

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Encryption")]
    encryption: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct CredentialRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    if ctx.explain && ctx.is_pretty() {
        Explain::scan().print();
    }

    let vault = if args.sample {
        CredentialVault::with_entries(samples::credentials())
    } else {
        CredentialVault::new()
    };
    let posture = Posture::with_vault(ctx.config.orchestrator.clone(), vault)?;

    let spinner = if ctx.is_pretty() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        pb.enable_steady_tick(POLL_INTERVAL);
        Some(pb)
    } else {
        None
    };

    let cycle = posture.begin_scan();
    while posture.is_scanning() {
        if let Some(pb) = &spinner {
            let state = posture.snapshot();
            let done = state.statuses().iter().filter(|s| s.is_resolved()).count();
            pb.set_message(format!("Scanning... {done}/3 subsystems reported"));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    let ticket = cycle.wait().await;
    debug!(generation = ticket.generation, "all scan tasks finished");
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let state = posture.snapshot();
    let output = ScanOutput {
        label: label(state.overall_score),
        posture: state,
        networks: posture.networks(),
        credentials: posture.credentials(),
        issues: posture.issues(),
        system_info: posture.system_info(),
    };
    if emit(ctx.output_format, &output)? {
        return Ok(());
    }

    print_pretty(&output);
    ctx.tip("Resolve host issues with: bulwark issues --resolve <ID>");
    Ok(())
}

fn print_pretty(output: &ScanOutput) {
    let state = &output.posture;

    println!("{}", "Security Posture".bold().underline());
    println!();
    if state.all_resolved() {
        println!(
            "  {} {}",
            "Overall:".bold(),
            score_colored(state.overall_score, output.label)
        );
    } else {
        println!(
            "  {} {}",
            "Overall:".bold(),
            "incomplete (a subsystem did not report in time)".yellow()
        );
    }
    for subsystem in Subsystem::ALL {
        println!(
            "  {:12} {}",
            format!("{subsystem}:").bold(),
            status_colored(state.status_of(subsystem))
        );
    }
    if let Some(at) = state.last_scan_at {
        println!();
        println!(
            "{}",
            format!(
                "Last scan: {}",
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            )
            .dimmed()
        );
    }

    if !output.networks.is_empty() {
        println!();
        println!("{}", "Networks:".bold().underline());
        let rows: Vec<NetworkRow> = output
            .networks
            .iter()
            .map(|n| NetworkRow {
                ssid: n.ssid.clone(),
                encryption: n.encryption.clone(),
                signal: format!("{}%", n.signal),
                status: status_colored(n.status).to_string(),
            })
            .collect();
        println!("{}", Table::new(&rows).with(Style::rounded()).to_string());
    }

    if !output.credentials.is_empty() {
        println!();
        println!("{}", "Credentials:".bold().underline());
        let rows: Vec<CredentialRow> = output
            .credentials
            .iter()
            .map(|c| CredentialRow {
                service: c.service.clone(),
                account: c.account.clone(),
                strength: format!("{}%", c.strength),
                status: status_colored(c.status).to_string(),
                updated: c.last_updated.format("%Y-%m-%d").to_string(),
            })
            .collect();
        println!("{}", Table::new(&rows).with(Style::rounded()).to_string());
    }

    if let Some(info) = &output.system_info {
        println!();
        print_system_info(info);
    }

    println!();
    if output.issues.is_empty() {
        println!("{} {}", "Issues:".bold(), "None detected".green());
    } else {
        println!("{}", "Issues:".bold().underline());
        super::issues::print_issue_list(&output.issues);
    }
}

fn print_system_info(info: &SystemInfo) {
    println!(
        "{} {}",
        "System:".bold().underline(),
        status_colored(info.status)
    );
    println!(
        "  CPU {}%  Memory {}%  Disk {}%  Battery {}%  {}°C",
        info.cpu_usage, info.memory_usage, info.disk_usage, info.battery_level, info.temperature
    );
    let suspicious = format!("{} suspicious", info.suspicious_processes);
    println!(
        "  Processes: {} running, {}",
        info.running_processes,
        if info.suspicious_processes > 0 {
            suspicious.red().to_string()
        } else {
            suspicious.green().to_string()
        }
    );
    println!(
        "{}",
        format!(
            "  Updated {}",
            info.last_updated.with_timezone(&Local).format("%H:%M:%S")
        )
        .dimmed()
    );
}
