//! Rule loaders
//!
//! Supports:
//! - the built-in pattern library
//! - TOML/JSON rule files (`[[rules]]` tables)
//! - composition of several sources

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Pattern, PatternRule};
use crate::infrastructure::regex_cache::cached_regex;
use crate::infrastructure::rules::default_rules::get_default_rules;

/// Trait for loading rules from various sources
pub trait RuleLoader: Send + Sync {
    fn load_rules(&self) -> Result<Vec<PatternRule>, RuleLoadError>;
}

/// Merges rules from several loaders; a failing source is skipped
pub struct CompositeRuleLoader {
    loaders: Vec<Box<dyn RuleLoader>>,
}

impl CompositeRuleLoader {
    pub fn new(loaders: Vec<Box<dyn RuleLoader>>) -> Self {
        Self { loaders }
    }
}

impl RuleLoader for CompositeRuleLoader {
    fn load_rules(&self) -> Result<Vec<PatternRule>, RuleLoadError> {
        let mut rules: Vec<PatternRule> = Vec::new();
        for loader in &self.loaders {
            match loader.load_rules() {
                Ok(loaded) => merge_rules(&mut rules, loaded),
                Err(e) => warn!(error = %e, "Rule loader failed; skipping source"),
            }
        }
        Ok(rules)
    }
}

/// Append `incoming` to `rules`; an incoming rule replaces one with the same id
pub fn merge_rules(rules: &mut Vec<PatternRule>, incoming: Vec<PatternRule>) {
    for rule in incoming {
        if let Some(existing) = rules.iter_mut().find(|r| r.id == rule.id) {
            debug!(rule_id = %rule.id, "Overriding rule");
            *existing = rule;
        } else {
            rules.push(rule);
        }
    }
}

/// Loader for the built-in pattern library
pub struct BuiltinRuleLoader;

impl BuiltinRuleLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuiltinRuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLoader for BuiltinRuleLoader {
    fn load_rules(&self) -> Result<Vec<PatternRule>, RuleLoadError> {
        let rules = get_default_rules();
        debug!(rule_count = rules.len(), "Loaded built-in rules");
        Ok(rules)
    }
}

/// Error type for rule loading
#[derive(Debug, thiserror::Error)]
pub enum RuleLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// File-based rule loader; `.json` files are JSON, anything else TOML
pub struct FileRuleLoader {
    file_path: PathBuf,
}

impl FileRuleLoader {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

impl RuleLoader for FileRuleLoader {
    fn load_rules(&self) -> Result<Vec<PatternRule>, RuleLoadError> {
        let content = std::fs::read_to_string(&self.file_path)?;
        let is_json = self
            .file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let rules_file: RulesFile = if is_json {
            debug!(file = %self.file_path.display(), "Loading rules from JSON file");
            serde_json::from_str(&content)?
        } else {
            debug!(file = %self.file_path.display(), "Loading rules from TOML file");
            toml::from_str(&content)?
        };

        let mut validated_rules = Vec::new();
        for rule in rules_file.rules {
            match validate_rule(&rule) {
                Ok(()) => validated_rules.push(rule),
                Err(e) => warn!(rule_id = %rule.id, error = %e, "Skipping invalid rule"),
            }
        }

        debug!(rule_count = validated_rules.len(), "Loaded rules from file");
        Ok(validated_rules)
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: Vec<PatternRule>,
}

/// Validate a rule for correctness
pub fn validate_rule(rule: &PatternRule) -> Result<(), RuleLoadError> {
    if rule.id.trim().is_empty() {
        return Err(RuleLoadError::InvalidRule("rule id cannot be empty".to_string()));
    }
    if rule.message.trim().is_empty() {
        return Err(RuleLoadError::InvalidRule(format!(
            "rule '{}' has an empty message",
            rule.id
        )));
    }
    validate_pattern(&rule.pattern)
        .map_err(|e| RuleLoadError::InvalidRule(format!("rule '{}': {}", rule.id, e)))
}

fn validate_pattern(pattern: &Pattern) -> Result<(), String> {
    match pattern {
        Pattern::Regex(source) => {
            if source.is_empty() {
                return Err("regex pattern cannot be empty".to_string());
            }
            cached_regex(source).map(|_| ()).map_err(|e| e.to_string())
        }
        Pattern::AnyOf(patterns) => {
            if patterns.is_empty() {
                return Err("AnyOf pattern needs at least one alternative".to_string());
            }
            patterns.iter().try_for_each(validate_pattern)
        }
        Pattern::UnboundedLoop => Ok(()),
    }
}
