//! Run Command - screen a fragment and judge it against test cases
//!
//! Test cases are read from a JSON file holding an array of
//! `{ "input": [...], "expectedOutput": ..., "description": "..." }` objects.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use evalguard_core::config::validation::MAX_TIMEOUT_MS;
use evalguard_core::{CaseStatus, TestCase, TestRunReport};

use crate::cli::Cli;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::{OutputFormat, pad};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// JavaScript file holding the fragment
    pub file: PathBuf,

    /// Name of the function to invoke
    #[arg(short, long)]
    pub entry: String,

    /// JSON file with the test cases
    #[arg(short, long)]
    pub cases: PathBuf,

    /// Per-case time limit in milliseconds (defaults to sandbox.timeout_ms)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_MS))]
    pub timeout_ms: Option<u64>,
}

/// Run the run command
pub async fn run(ctx: &CliContext, _cli: &Cli, args: &RunArgs) -> Result<i32> {
    let (fragment, cases) = match load_inputs(ctx, args) {
        Ok(inputs) => inputs,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    if !ctx.evaluator.is_executor_ready() {
        ctx.output.warn(
            "No JavaScript runtime available; every case will report a runtime error",
        );
    }

    let time_limit = args.timeout_ms.map(Duration::from_millis);
    if ctx.output.is_verbose() {
        let sandbox = &ctx.config.sandbox;
        ctx.output.info(&format!(
            "Sandbox backend '{}', {}ms per case, {}ms start-up grace",
            sandbox.backend,
            args.timeout_ms.unwrap_or(sandbox.timeout_ms),
            sandbox.startup_grace_ms
        ));
    }
    let report = ctx
        .evaluator
        .evaluate(&fragment, &args.entry, &cases, time_limit)
        .await;

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&report)?,
        OutputFormat::Table | OutputFormat::Plain => print_report(ctx, &report),
    }

    Ok(if report.blocked || !report.all_passed() {
        exit_codes::CHECK_FAILED
    } else {
        exit_codes::SUCCESS
    })
}

fn load_inputs(ctx: &CliContext, args: &RunArgs) -> Result<(String, Vec<TestCase>)> {
    let fragment = ctx.read_input(&args.file)?;
    let raw = ctx.read_input(&args.cases)?;
    let cases: Vec<TestCase> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid test cases in {}", args.cases.display()))?;
    Ok((fragment, cases))
}

fn print_report(ctx: &CliContext, report: &TestRunReport) {
    ctx.output.header(&format!("Test Run: {}", report.entry_point));

    if report.blocked {
        for issue in &report.safety_report.issues {
            ctx.output.print(&format!("issue    {}", issue));
        }
        for warning in &report.safety_report.warnings {
            ctx.output.print(&format!("warning  {}", warning));
        }
        ctx.output
            .error("Fragment blocked by safety analysis; no cases were run");
        return;
    }

    for warning in &report.safety_report.warnings {
        ctx.output.warn(warning);
    }

    for result in &report.results {
        ctx.output.print(&format!(
            "{} {} ({}ms)",
            pad(result.status.as_str(), 14),
            result.description,
            result.duration_ms
        ));
        match result.status {
            CaseStatus::Passed => {}
            CaseStatus::WrongAnswer => {
                ctx.output
                    .print(&format!("    expected: {}", result.expected));
                let actual = result
                    .actual
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "null".to_string());
                ctx.output.print(&format!("    actual:   {}", actual));
            }
            CaseStatus::RuntimeError | CaseStatus::TimedOut => {
                if let Some(error) = &result.error {
                    ctx.output.print(&format!("    error:    {}", error));
                }
            }
        }
    }

    let summary = format!("{}/{} cases passed", report.passed_count, report.total_count);
    if report.all_passed() {
        ctx.output.success(&summary);
    } else {
        ctx.output.error(&summary);
    }
}
