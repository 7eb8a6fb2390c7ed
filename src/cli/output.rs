//! Output formatting for the CLI
//!
//! Results go to stdout. Status lines go to stderr so `--format json`
//! output stays machine readable.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, aligned columns
    Table,
    /// Line oriented, no decoration
    Plain,
    /// Pretty-printed JSON
    Json,
}

/// Writes results and status lines according to CLI flags
pub struct OutputWriter {
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Section header, suppressed in quiet and json modes
    pub fn header(&self, title: &str) {
        if self.quiet || self.format == OutputFormat::Json {
            return;
        }
        eprintln!("\n{}", title);
        eprintln!("{}", "=".repeat(title.chars().count()));
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("ok: {}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("warning: {}", message);
        }
    }

    /// Errors are printed even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }

    /// Result line on stdout
    pub fn print(&self, line: &str) {
        println!("{}", line);
    }

    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Pad `text` to `width` characters
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}
