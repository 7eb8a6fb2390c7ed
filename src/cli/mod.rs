//! Evalguard CLI - screen, run and judge solution fragments from the shell
//!
//! ## Commands
//! - `check`: pre-flight safety report (blocking issues vs. warnings)
//! - `capabilities`: host-only API references
//! - `run`: full evaluation against a JSON list of test cases
//! - `sanitize`: make a diagnostic message safe for display

mod commands;
mod context;
mod output;

pub use context::CliContext;
pub use output::{OutputFormat, OutputWriter};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Evalguard - screen and judge JavaScript solution fragments
#[derive(Parser, Debug)]
#[command(
    name = "evalguard",
    version,
    about = "Screen, execute and judge JavaScript solution fragments",
    long_about = "Evalguard screens submitted JavaScript fragments for unsafe constructs, \
                  runs them in an isolated worker with a hard deadline and compares the \
                  results against expected outputs.\n\n\
                  Exit codes: 0 success, 1 blocked or failing cases, 2 input or \
                  configuration error, 99 internal error."
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "EVALGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the safety analyzer on a fragment
    #[command(visible_alias = "c")]
    Check(commands::check::CheckArgs),

    /// List host-only APIs a fragment references
    #[command(visible_alias = "caps")]
    Capabilities(commands::capabilities::CapabilitiesArgs),

    /// Screen a fragment and run it against test cases
    #[command(visible_alias = "r")]
    Run(commands::run::RunArgs),

    /// Redact paths from a message and bound its length
    Sanitize(commands::sanitize::SanitizeArgs),
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    context: CliContext,
}

impl CliApp {
    /// Parse arguments from the process and build the context
    pub async fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let context = CliContext::new(&cli)?;
        Ok(Self { cli, context })
    }

    /// Run the CLI application
    pub async fn run(self) -> anyhow::Result<i32> {
        match self.cli.command {
            Commands::Check(ref args) => commands::check::run(&self.context, &self.cli, args),
            Commands::Capabilities(ref args) => {
                commands::capabilities::run(&self.context, &self.cli, args)
            }
            Commands::Run(ref args) => commands::run::run(&self.context, &self.cli, args).await,
            Commands::Sanitize(ref args) => {
                commands::sanitize::run(&self.context, &self.cli, args)
            }
        }
    }
}

/// Exit codes for CI integration
pub mod exit_codes {
    /// Success - fragment allowed and every case passed
    pub const SUCCESS: i32 = 0;
    /// Fragment blocked by the safety gate, or at least one case failed
    pub const CHECK_FAILED: i32 = 1;
    /// Configuration or input error
    pub const CONFIG_ERROR: i32 = 2;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = 99;
}
