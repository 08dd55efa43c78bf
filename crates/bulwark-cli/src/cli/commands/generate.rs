//! `bulwark generate` - Generate a random password.

use anyhow::Result;
use bulwark::scoring::generate_password;
use bulwark::Posture;
use colored::Colorize;

use super::Context;
use crate::cli::args::GenerateArgs;
use crate::education::Explain;
use crate::output::{emit, score_colored, status_colored};

#[derive(serde::Serialize)]
struct GenerateOutput {
    password: String,
    score: u8,
    status: bulwark_core::Status,
}

pub fn execute(ctx: Context, args: GenerateArgs) -> Result<()> {
    if ctx.explain && ctx.is_pretty() {
        Explain::generate(args.length).print();
    }

    let password = generate_password(args.length, !args.no_symbols)?;
    let report = Posture::score(&password);

    let output = GenerateOutput {
        password,
        score: report.score,
        status: report.status,
    };
    if emit(ctx.output_format, &output)? {
        return Ok(());
    }

    println!("{}", output.password.bright_white().bold());
    println!(
        "{} {}   {}",
        "Strength:".bold(),
        score_colored(report.score, bulwark::classify::label(report.score)),
        status_colored(report.status)
    );
    for item in &report.feedback {
        println!("  {} {}", "-".yellow(), item.dimmed());
    }

    Ok(())
}
