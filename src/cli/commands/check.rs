//! Check Command - pre-flight safety analysis
//!
//! Reports blocking issues and advisory warnings for a fragment without
//! executing it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use evalguard_core::SafetyReport;
use evalguard_safety::SafetyFinding;

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::{OutputFormat, pad};

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JavaScript file holding the fragment
    pub file: PathBuf,

    /// Exit non-zero on warnings too
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub file: PathBuf,
    pub report: SafetyReport,
    pub findings: Vec<SafetyFinding>,
}

/// Run the check command
pub fn run(ctx: &CliContext, _cli: &Cli, args: &CheckArgs) -> Result<i32> {
    let fragment = match ctx.read_input(&args.file) {
        Ok(text) => text,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let result = CheckResult {
        file: args.file.clone(),
        report: ctx.evaluator.analyze(&fragment),
        findings: ctx.evaluator.findings(&fragment),
    };

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&result)?,
        OutputFormat::Table | OutputFormat::Plain => print_report(ctx, &result),
    }

    let failed = !result.report.safe || (args.strict && result.report.has_warnings());
    Ok(if failed {
        exit_codes::CHECK_FAILED
    } else {
        exit_codes::SUCCESS
    })
}

fn print_report(ctx: &CliContext, result: &CheckResult) {
    ctx.output
        .header(&format!("Safety Check: {}", result.file.display()));

    if result.findings.is_empty() {
        ctx.output.success("No unsafe constructs found");
    } else if ctx.output.format() == OutputFormat::Table {
        for finding in &result.findings {
            ctx.output.print(&format!(
                "{} line {:<5} {} {}",
                pad(finding.severity.as_str(), 8),
                finding.line,
                pad(&finding.rule_id, 28),
                finding.message
            ));
        }
    } else {
        for finding in &result.findings {
            ctx.output.print(&format!(
                "{}:{}: {}: {}",
                result.file.display(),
                finding.line,
                finding.severity.as_str(),
                finding.message
            ));
        }
    }

    if result.report.safe {
        if result.report.has_warnings() {
            ctx.output.warn(&format!(
                "Allowed with {} warning(s)",
                result.report.warnings.len()
            ));
        }
    } else {
        ctx.output.error(&format!(
            "Blocked: {} issue(s), {} warning(s)",
            result.report.issues.len(),
            result.report.warnings.len()
        ));
    }
}
