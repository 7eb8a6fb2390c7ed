//! CLI Context - services shared by every subcommand

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use evalguard_core::config::Config;
use evalguard_core::init_tracing;

use crate::Evaluator;
use crate::cli::Cli;
use crate::cli::output::OutputWriter;

/// Context for CLI operations
pub struct CliContext {
    /// Application configuration
    pub config: Config,

    pub evaluator: Evaluator,

    /// Output writer configured based on CLI flags
    pub output: OutputWriter,

    /// Base for relative input paths
    pub working_dir: PathBuf,
}

impl CliContext {
    /// Create a new CLI context from parsed CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Self::load_config(cli.config.as_deref())?;

        if cli.verbose {
            config.logging.level = "debug".to_string();
        } else if cli.quiet {
            config.logging.level = "error".to_string();
        }
        init_tracing(&config.logging)
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        let evaluator = Evaluator::from_config(&config).context("Failed to set up evaluator")?;
        let output = OutputWriter::new(cli.format, cli.quiet, cli.verbose);
        let working_dir =
            std::env::current_dir().context("Failed to determine current working directory")?;

        Ok(Self {
            config,
            evaluator,
            output,
            working_dir,
        })
    }

    fn load_config(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display())),
            None => Config::load().or_else(|e| {
                tracing::debug!(error = %e, "No usable config files found, using defaults");
                Ok(Config::default())
            }),
        }
    }

    /// Resolve a user-supplied path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    /// Read a fragment or data file
    pub fn read_input(&self, path: &Path) -> Result<String> {
        let resolved = self.resolve(path);
        std::fs::read_to_string(&resolved)
            .with_context(|| format!("Failed to read {}", resolved.display()))
    }
}
