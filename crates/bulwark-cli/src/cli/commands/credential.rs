//! `bulwark credential` - Manage credentials.

use anyhow::{Context as _, Result};
use bulwark_core::{CredentialEntry, Status, Subsystem};
use colored::Colorize;
use dialoguer::Password;
use serde::Serialize;

use super::Context;
use crate::cli::args::{CredentialArgs, CredentialCommands};
use crate::education::Explain;
use crate::output::{emit, status_colored};

#[derive(Serialize)]
struct AddOutput {
    entry: CredentialEntry,
    credential_status: Status,
}

pub fn execute(ctx: Context, args: CredentialArgs) -> Result<()> {
    match args.command {
        CredentialCommands::Add {
            service,
            account,
            secret_env,
        } => add(&ctx, &service, &account, secret_env.as_deref()),
    }
}

fn add(ctx: &Context, service: &str, account: &str, secret_env: Option<&str>) -> Result<()> {
    if ctx.explain && ctx.is_pretty() {
        Explain::credential_add(service).print();
    }

    let secret = match secret_env {
        Some(var) => std::env::var(var)
            .with_context(|| format!("environment variable {var} is not set"))?,
        None => Password::new()
            .with_prompt(format!("Secret for {account} @ {service}"))
            .interact()?,
    };

    let posture = ctx.posture()?;
    let entry = posture.add_credential(service, account, &secret);
    drop(secret);

    let output = AddOutput {
        credential_status: posture.snapshot().status_of(Subsystem::Credential),
        entry,
    };
    if emit(ctx.output_format, &output)? {
        return Ok(());
    }

    let entry = &output.entry;
    println!("{} {}", "Added:".green().bold(), entry.service.cyan());
    println!("  {} {}", "Account:".bold(), entry.account);
    println!("  {} {}", "Secret:".bold(), entry.masked.dimmed());
    println!(
        "  {} {}% {}",
        "Strength:".bold(),
        entry.strength,
        status_colored(entry.status)
    );
    println!("  {} {}", "ID:".bold(), entry.id.dimmed());
    println!();
    println!(
        "{} {}",
        "Credential subsystem:".bold(),
        status_colored(output.credential_status)
    );

    ctx.tip("The vault lives only for this run; nothing is written to disk.");
    Ok(())
}
