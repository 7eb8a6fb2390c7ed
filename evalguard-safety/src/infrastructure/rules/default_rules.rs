//! The built-in pattern library
//!
//! Issues block execution; warnings are surfaced alongside results. Every
//! matcher is anchored on identifier boundaries so names that merely contain
//! a keyword (`evaluation`, `myFunction`) do not match.

use crate::domain::{Pattern, PatternRule, RuleSeverity};

fn rule(
    id: &str,
    name: &str,
    severity: RuleSeverity,
    pattern: Pattern,
    message: &str,
    description: &str,
) -> PatternRule {
    PatternRule {
        id: id.to_string(),
        name: name.to_string(),
        severity,
        pattern,
        message: message.to_string(),
        description: Some(description.to_string()),
    }
}

/// Direct call of `eval`
pub fn eval_call_rule() -> PatternRule {
    rule(
        "eval-call",
        "Dynamic evaluation",
        RuleSeverity::Issue,
        Pattern::regex(r"\beval\s*\("),
        "Use of eval() detected - this is a security risk",
        "Calls to eval execute arbitrary strings as code",
    )
}

/// `Function(...)` / `new Function(...)`
pub fn function_constructor_rule() -> PatternRule {
    rule(
        "function-constructor",
        "Function constructor",
        RuleSeverity::Issue,
        Pattern::regex(r"\bFunction\s*\("),
        "Use of Function constructor detected - this is a security risk",
        "The Function constructor compiles strings into code",
    )
}

/// Any reference to `__proto__`
pub fn proto_access_rule() -> PatternRule {
    rule(
        "proto-access",
        "Prototype access",
        RuleSeverity::Issue,
        Pattern::regex(r"\b__proto__\b"),
        "Prototype pollution via __proto__ detected - this is a security risk",
        "Writing through __proto__ mutates shared prototypes",
    )
}

/// Assignment to `.innerHTML` (plain or `+=`), not comparison
pub fn inner_html_write_rule() -> PatternRule {
    rule(
        "inner-html-write",
        "innerHTML assignment",
        RuleSeverity::Warning,
        Pattern::regex(r"\.innerHTML\s*\+?=(?:[^=]|$)"),
        "innerHTML usage detected - be careful with user input",
        "Markup built from input can inject script",
    )
}

pub fn document_write_rule() -> PatternRule {
    rule(
        "document-write",
        "document.write",
        RuleSeverity::Warning,
        Pattern::regex(r"\bdocument\s*\.\s*write(?:ln)?\s*\("),
        "document.write() usage detected - this can be unsafe",
        "document.write injects raw markup into the page",
    )
}

/// `location.href = ...`, or a bare `location = ...` in statement position
///
/// Declarations (`let location = 3`) and arrow parameters
/// (`location => ...`) are not navigation.
pub fn location_assignment_rule() -> PatternRule {
    rule(
        "location-assignment",
        "Location assignment",
        RuleSeverity::Warning,
        Pattern::AnyOf(vec![
            Pattern::regex(r"\blocation\s*\.\s*href\s*=(?:[^=>]|$)"),
            Pattern::regex(
                r"(?m)(?:^|[;{})]|\b(?:window|document|self|top)\s*\.)\s*location\s*=(?:[^=>]|$)",
            ),
        ]),
        "Direct location assignment detected - potential open redirect",
        "Navigating to a computed URL can redirect users to arbitrary sites",
    )
}

/// `x.constructor[...]` or `x["constructor"]`
pub fn constructor_bracket_access_rule() -> PatternRule {
    rule(
        "constructor-bracket-access",
        "Constructor access",
        RuleSeverity::Warning,
        Pattern::AnyOf(vec![
            Pattern::regex(r"\bconstructor\s*\["),
            Pattern::regex(r#"\[\s*["'`]constructor["'`]\s*\]"#),
        ]),
        "Constructor property access detected - potential prototype pollution",
        "Reaching the constructor through brackets can escape to Function",
    )
}

pub fn unbounded_loop_rule() -> PatternRule {
    rule(
        "unbounded-loop",
        "Unbounded loop",
        RuleSeverity::Warning,
        Pattern::UnboundedLoop,
        "Potential infinite loop detected - make sure there is a break condition",
        "while(true) and for(;;) loops need an exit inside their body",
    )
}

/// `Array(n)` / `new Array(n)` with a literal of six or more digits
pub fn large_array_allocation_rule() -> PatternRule {
    rule(
        "large-array-allocation",
        "Large array allocation",
        RuleSeverity::Warning,
        Pattern::regex(r"\bArray\s*\(\s*\d{6,}"),
        "Large array allocation detected - this may cause memory issues",
        "Preallocating hundreds of thousands of slots exhausts the heap",
    )
}

/// Every built-in rule, issues first
pub fn get_default_rules() -> Vec<PatternRule> {
    vec![
        eval_call_rule(),
        function_constructor_rule(),
        proto_access_rule(),
        inner_html_write_rule(),
        document_write_rule(),
        location_assignment_rule(),
        constructor_bracket_access_rule(),
        unbounded_loop_rule(),
        large_array_allocation_rule(),
    ]
}
