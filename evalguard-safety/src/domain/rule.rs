//! Pattern rule types

use serde::{Deserialize, Serialize};

/// Whether a rule blocks execution or only advises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Security risk; execution is refused
    Issue,
    /// Risky but allowed; surfaced alongside results
    Warning,
}

impl RuleSeverity {
    pub fn is_blocking(&self) -> bool {
        matches!(self, RuleSeverity::Issue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSeverity::Issue => "issue",
            RuleSeverity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declarative screening rule
///
/// Rules are evaluated independently of each other; no rule depends on the
/// outcome of another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Unique rule identifier (e.g., "eval-call")
    pub id: String,
    /// Human-readable rule name
    pub name: String,
    pub severity: RuleSeverity,
    /// The predicate over source text
    pub pattern: Pattern,
    /// Message appended to the report when the rule matches
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Predicate over source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Pattern {
    /// Regular expression (Rust `regex` syntax)
    Regex(String),

    /// Matches if any nested pattern matches
    AnyOf(Vec<Pattern>),

    /// `while(true)` / `for(;;)` loop whose body contains no `break`
    UnboundedLoop,
}

impl Pattern {
    /// Create a regex pattern
    pub fn regex(pattern: impl Into<String>) -> Self {
        Pattern::Regex(pattern.into())
    }

    /// All regex sources contained in this pattern
    pub fn regex_sources(&self) -> Vec<&str> {
        match self {
            Pattern::Regex(source) => vec![source.as_str()],
            Pattern::AnyOf(patterns) => patterns.iter().flat_map(|p| p.regex_sources()).collect(),
            Pattern::UnboundedLoop => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_roundtrips_through_json_shape() {
        let rule = PatternRule {
            id: "custom".to_string(),
            name: "Custom".to_string(),
            severity: RuleSeverity::Warning,
            pattern: Pattern::AnyOf(vec![Pattern::regex(r"\bfoo\("), Pattern::UnboundedLoop]),
            message: "custom rule".to_string(),
            description: None,
        };

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["pattern"]["type"], "AnyOf");
        assert_eq!(value["pattern"]["value"][1]["type"], "UnboundedLoop");
    }

    #[test]
    fn test_regex_sources_flatten_nested_patterns() {
        let pattern = Pattern::AnyOf(vec![
            Pattern::regex("a"),
            Pattern::AnyOf(vec![Pattern::regex("b"), Pattern::UnboundedLoop]),
        ]);
        assert_eq!(pattern.regex_sources(), vec!["a", "b"]);
    }

    #[test]
    fn test_only_issues_block() {
        assert!(RuleSeverity::Issue.is_blocking());
        assert!(!RuleSeverity::Warning.is_blocking());
    }
}
