//! Compiled form of a [`Pattern`]

use std::sync::Arc;

use regex::Regex;

use super::loop_scan;
use super::regex_cache::cached_regex;
use crate::domain::Pattern;

/// A pattern with its regexes compiled
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    Regex(Arc<Regex>),
    AnyOf(Vec<CompiledPattern>),
    UnboundedLoop,
}

impl CompiledPattern {
    pub fn compile(pattern: &Pattern) -> Result<Self, regex::Error> {
        Ok(match pattern {
            Pattern::Regex(source) => CompiledPattern::Regex(cached_regex(source)?),
            Pattern::AnyOf(patterns) => CompiledPattern::AnyOf(
                patterns
                    .iter()
                    .map(CompiledPattern::compile)
                    .collect::<Result<_, _>>()?,
            ),
            Pattern::UnboundedLoop => CompiledPattern::UnboundedLoop,
        })
    }

    /// Byte offset of the earliest match in `text`
    pub fn first_match(&self, text: &str) -> Option<usize> {
        match self {
            CompiledPattern::Regex(regex) => regex.find(text).map(|m| m.start()),
            CompiledPattern::AnyOf(patterns) => {
                patterns.iter().filter_map(|p| p.first_match(text)).min()
            }
            CompiledPattern::UnboundedLoop => loop_scan::first_unbounded_loop(text),
        }
    }
}

/// 1-based line number of a byte offset
pub fn line_of(text: &str, offset: usize) -> u32 {
    let prefix = text.get(..offset).unwrap_or(text);
    (prefix.bytes().filter(|b| *b == b'\n').count() + 1) as u32
}
