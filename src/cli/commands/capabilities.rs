//! Capabilities Command - host-only API references

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use evalguard_safety::HostApi;

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;

/// Arguments for the capabilities command
#[derive(Args, Debug)]
pub struct CapabilitiesArgs {
    /// JavaScript file holding the fragment
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesResult {
    pub file: PathBuf,
    pub requires_host: bool,
    pub apis: Vec<HostApi>,
}

/// Run the capabilities command
///
/// Detection is advisory, so the exit code is success whatever is found.
pub fn run(ctx: &CliContext, _cli: &Cli, args: &CapabilitiesArgs) -> Result<i32> {
    let fragment = match ctx.read_input(&args.file) {
        Ok(text) => text,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let apis = ctx.evaluator.capabilities(&fragment);
    let result = CapabilitiesResult {
        file: args.file.clone(),
        requires_host: !apis.is_empty(),
        apis,
    };

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&result)?,
        OutputFormat::Table | OutputFormat::Plain => {
            ctx.output.header("Host API References");
            if result.apis.is_empty() {
                ctx.output
                    .success("Fragment can run in the isolated executor");
            } else {
                for api in &result.apis {
                    ctx.output.print(api.identifier());
                }
                ctx.output
                    .info("Fragment references host-only APIs and needs a host environment");
            }
        }
    }

    Ok(exit_codes::SUCCESS)
}
