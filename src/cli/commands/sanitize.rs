//! Sanitize Command - redact paths from a diagnostic message

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;

/// Arguments for the sanitize command
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Message to sanitize (reads stdin when omitted)
    pub message: Option<String>,
}

/// Run the sanitize command
pub fn run(ctx: &CliContext, _cli: &Cli, args: &SanitizeArgs) -> Result<i32> {
    let message = match &args.message {
        Some(message) => message.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            buffer.trim_end_matches(['\n', '\r']).to_string()
        }
    };

    let sanitized = ctx.evaluator.sanitize_with_count(&message);
    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&sanitized)?,
        OutputFormat::Table | OutputFormat::Plain => {
            ctx.output.print(&sanitized.text);
            if sanitized.paths_redacted > 0 && ctx.output.is_verbose() {
                ctx.output
                    .info(&format!("Redacted {} path(s)", sanitized.paths_redacted));
            }
        }
    }

    Ok(exit_codes::SUCCESS)
}
