//! `bulwark check` - Score a password.

use anyhow::Result;
use bulwark::classify::label;
use bulwark::Posture;
use bulwark_core::ScoreReport;
use colored::Colorize;
use dialoguer::Password;
use serde::Serialize;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::education::Explain;
use crate::output::{emit, score_colored, status_colored};

#[derive(Serialize)]
struct CheckOutput<'a> {
    #[serde(flatten)]
    report: &'a ScoreReport,
    label: bulwark_core::ScoreLabel,
}

pub fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    if ctx.explain && ctx.is_pretty() {
        Explain::check().print();
    }

    let secret = match args.secret {
        Some(secret) => secret,
        None => Password::new()
            .with_prompt("Password to check")
            .allow_empty_password(true)
            .interact()?,
    };

    let report = Posture::score(&secret);
    print_report(&ctx, &report)
}

/// Render a score report in the context's format.
fn print_report(ctx: &Context, report: &ScoreReport) -> Result<()> {
    let output = CheckOutput {
        report,
        label: label(report.score),
    };
    if emit(ctx.output_format, &output)? {
        return Ok(());
    }

    if report.is_no_input() {
        println!("{}", "No password entered.".dimmed());
        return Ok(());
    }

    println!(
        "{} {}   {}",
        "Strength:".bold(),
        score_colored(report.score, output.label),
        status_colored(report.status)
    );

    if report.feedback.is_empty() {
        println!();
        println!("{}", "No recommendations. Nicely done.".green());
    } else {
        println!();
        println!("{}", "Recommendations:".bold());
        for item in &report.feedback {
            println!("  {} {}", "-".yellow(), item);
        }
    }

    ctx.tip("bulwark generate creates a strong random password.");
    Ok(())
}
