//! Built-in pattern library and rule loaders

pub mod default_rules;
pub mod loader;

pub use default_rules::get_default_rules;
pub use loader::{BuiltinRuleLoader, CompositeRuleLoader, FileRuleLoader, RuleLoadError, RuleLoader};
