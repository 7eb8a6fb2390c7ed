//! The safety analyzer
//!
//! Evaluates every rule of the pattern library independently against a
//! fragment and classifies matches into blocking issues and advisory
//! warnings. Each rule contributes at most one entry, in library order.

use once_cell::sync::Lazy;
use tracing::{debug, instrument, warn};

use evalguard_core::SafetyReport;
use evalguard_core::config::AnalysisConfig;

use crate::domain::{PatternRule, RuleSeverity, SafetyFinding};
use crate::infrastructure::matcher::{CompiledPattern, line_of};
use crate::infrastructure::rules::loader::merge_rules;
use crate::infrastructure::rules::{
    BuiltinRuleLoader, FileRuleLoader, RuleLoadError, RuleLoader, get_default_rules,
};

static DEFAULT_ANALYZER: Lazy<SafetyAnalyzer> = Lazy::new(SafetyAnalyzer::new);

struct CompiledRule {
    rule: PatternRule,
    pattern: CompiledPattern,
}

/// Screens source text against a fixed set of rules
///
/// The rule set is read-only after construction, so an analyzer can be
/// shared freely between threads.
pub struct SafetyAnalyzer {
    rules: Vec<CompiledRule>,
}

impl SafetyAnalyzer {
    /// Analyzer over the built-in pattern library
    pub fn new() -> Self {
        Self::with_rules(get_default_rules())
    }

    /// Analyzer over an explicit rule set
    ///
    /// Rules whose pattern does not compile are skipped.
    pub fn with_rules(rules: Vec<PatternRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|rule| match CompiledPattern::compile(&rule.pattern) {
                Ok(pattern) => Some(CompiledRule { rule, pattern }),
                Err(e) => {
                    warn!(rule_id = %rule.id, error = %e, "Skipping rule with invalid pattern");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn from_loader(loader: &dyn RuleLoader) -> Result<Self, RuleLoadError> {
        Ok(Self::with_rules(loader.load_rules()?))
    }

    /// Built-in rules (unless disabled) plus the configured rules file
    ///
    /// A configured file that cannot be read or parsed is an error.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, RuleLoadError> {
        let mut rules = if config.include_builtin_rules {
            BuiltinRuleLoader::new().load_rules()?
        } else {
            Vec::new()
        };

        if let Some(path) = &config.rules_file {
            let extra = FileRuleLoader::new(path).load_rules()?;
            merge_rules(&mut rules, extra);
        }

        debug!(rule_count = rules.len(), "Configured safety analyzer");
        Ok(Self::with_rules(rules))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Every matched rule with the line of its first occurrence
    pub fn findings(&self, text: &str) -> Vec<SafetyFinding> {
        self.rules
            .iter()
            .filter_map(|compiled| {
                compiled.pattern.first_match(text).map(|offset| SafetyFinding {
                    rule_id: compiled.rule.id.clone(),
                    severity: compiled.rule.severity,
                    message: compiled.rule.message.clone(),
                    line: line_of(text, offset),
                })
            })
            .collect()
    }

    /// Classify `text`; `safe` is true exactly when no issue matched
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn analyze(&self, text: &str) -> SafetyReport {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        for finding in self.findings(text) {
            match finding.severity {
                RuleSeverity::Issue => issues.push(finding.message),
                RuleSeverity::Warning => warnings.push(finding.message),
            }
        }

        let report = SafetyReport::new(issues, warnings);
        debug!(
            safe = report.safe,
            issues = report.issues.len(),
            warnings = report.warnings.len(),
            "Safety analysis complete"
        );
        report
    }
}

impl Default for SafetyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze `text` with the shared built-in analyzer
pub fn analyze(text: &str) -> SafetyReport {
    DEFAULT_ANALYZER.analyze(text)
}
