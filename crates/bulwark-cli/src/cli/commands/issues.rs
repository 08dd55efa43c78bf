//! `bulwark issues` - List and resolve host security issues.

use anyhow::Result;
use bulwark_core::{SecurityIssue, Status, Subsystem};
use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::args::IssuesArgs;
use crate::education::Explain;
use crate::output::{emit, status_colored};

#[derive(Serialize)]
struct IssuesOutput {
    resolved: Vec<String>,
    system_status: Status,
    issues: Vec<SecurityIssue>,
}

pub async fn execute(ctx: Context, args: IssuesArgs) -> Result<()> {
    if ctx.explain && ctx.is_pretty() {
        Explain::issues().print();
    }

    // Only the system check is needed to list issues
    let posture = ctx.posture()?;
    if let Some(cycle) = posture.rescan(Subsystem::System) {
        cycle.wait().await;
    }

    let mut resolve: Vec<String> = Vec::with_capacity(args.resolve.len());
    for id in args.resolve {
        if !resolve.contains(&id) {
            resolve.push(id);
        }
    }

    // Reject the whole request before touching any issue
    let open = posture.issues();
    if let Some(id) = resolve.iter().find(|id| !open.iter().any(|i| &i.id == *id)) {
        anyhow::bail!("No open issue with id {id}");
    }
    for id in &resolve {
        posture.resolve_issue(id);
    }

    let output = IssuesOutput {
        resolved: resolve,
        system_status: posture.snapshot().system_status,
        issues: posture.issues(),
    };
    if emit(ctx.output_format, &output)? {
        return Ok(());
    }

    for id in &output.resolved {
        println!("{} issue {}", "Resolved:".green().bold(), id.cyan());
    }
    if !output.resolved.is_empty() {
        println!();
    }

    if output.issues.is_empty() {
        println!("{}", "No open issues.".green());
    } else {
        print_issue_list(&output.issues);
    }
    println!();
    println!("{} {}", "System status:".bold(), status_colored(output.system_status));

    if !output.issues.is_empty() {
        ctx.tip("Resolve an issue with: bulwark issues --resolve <ID>");
    }
    Ok(())
}

/// Print issues as an indented list, most severe first.
pub fn print_issue_list(issues: &[SecurityIssue]) {
    let mut sorted: Vec<&SecurityIssue> = issues.iter().collect();
    sorted.sort_by_key(|i| Status::TERMINAL.iter().position(|s| *s == i.severity));

    for issue in sorted {
        println!(
            "  {} {} {}",
            format!("[{}]", issue.id).dimmed(),
            status_colored(issue.severity),
            issue.title.bold()
        );
        if !issue.description.is_empty() {
            println!("      {}", issue.description.dimmed());
        }
    }
}
