//! Process-wide cache of compiled rule regexes
//!
//! Rule sources are compiled once and shared by every analyzer instance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

static RULE_REGEX_CACHE: Lazy<RwLock<HashMap<String, Arc<Regex>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Compile `source`, or return the cached compilation
pub fn cached_regex(source: &str) -> Result<Arc<Regex>, regex::Error> {
    if let Some(existing) = RULE_REGEX_CACHE
        .read()
        .ok()
        .and_then(|guard| guard.get(source).cloned())
    {
        return Ok(existing);
    }

    let compiled = Arc::new(Regex::new(source)?);
    if let Ok(mut guard) = RULE_REGEX_CACHE.write() {
        let entry = guard
            .entry(source.to_string())
            .or_insert_with(|| Arc::clone(&compiled));
        return Ok(Arc::clone(entry));
    }

    Ok(compiled)
}
