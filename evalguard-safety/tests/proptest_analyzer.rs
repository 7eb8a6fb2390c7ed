//! Property tests for the safety analyzer

use evalguard_safety::{SafetyAnalyzer, analyze};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_safe_iff_no_issues(source in ".{0,400}") {
        let report = analyze(&source);
        prop_assert_eq!(report.safe, report.issues.is_empty());
    }

    #[test]
    fn test_analysis_is_deterministic(source in ".{0,400}") {
        let analyzer = SafetyAnalyzer::new();
        prop_assert_eq!(analyzer.analyze(&source), analyzer.analyze(&source));
    }

    #[test]
    fn test_at_most_one_entry_per_rule(source in "(eval\\(x\\);|el\\.innerHTML = y;|[a-z ]{1,8}){0,20}") {
        let analyzer = SafetyAnalyzer::new();
        let report = analyzer.analyze(&source);
        prop_assert!(report.issues.len() + report.warnings.len() <= analyzer.rule_count());
        prop_assert!(report.issues.len() <= 1);
    }

    #[test]
    fn test_identifiers_without_boundaries_are_clean(suffix in "[a-z]{1,10}") {
        let source = format!("const eval{suffix} = 1; my{suffix}Function(2);");
        prop_assert!(analyze(&source).safe);
    }
}
