//! Diagnostic message sanitizer
//!
//! Messages produced by candidate code (or by the runtime hosting it) may
//! contain absolute filesystem paths and arbitrarily long text. Before a
//! diagnostic is handed to a collaborator for display, every path fragment
//! is replaced with `[path]` and the result is bounded in length.
//!
//! A path fragment is either a Windows drive-letter path (`C:\...` or `C:/...`)
//! or a Unix-style path with at least two `/`-delimited segments
//! (`/home/user`, `~/src/a.js`, `./lib/x.js`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Default upper bound on sanitized message length, in characters
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Marker appended to truncated messages
pub const ELLIPSIS: &str = "...";

/// Replacement token for redacted path fragments
pub const PATH_TOKEN: &str = "[path]";

static PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<lead>^|[^\w])",
        r"(?P<path>",
        r#"[A-Za-z]:[\\/][^\s,;'"`()<>\[\]{}|]*"#,
        r"|",
        r#"(?:~|\.{1,2})?/[^\s/,;:'"`()<>\[\]{}|]+(?:/[^\s/,;:'"`()<>\[\]{}|]+)+/?"#,
        r")",
    ))
    .expect("valid path regex")
});

/// Sanitized text plus the number of redacted path fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedMessage {
    pub text: String,
    pub paths_redacted: usize,
}

/// Redacts filesystem paths and bounds message length
#[derive(Debug, Clone, Copy)]
pub struct MessageSanitizer {
    max_length: usize,
}

impl Default for MessageSanitizer {
    fn default() -> Self {
        Self::new(MAX_MESSAGE_LENGTH)
    }
}

impl MessageSanitizer {
    /// Create a sanitizer with a custom length bound.
    ///
    /// Bounds smaller than the ellipsis marker plus one character are raised
    /// to that minimum.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(ELLIPSIS.len() + 1),
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Sanitize a message for display
    pub fn sanitize(&self, message: &str) -> String {
        self.sanitize_with_count(message).text
    }

    /// Sanitize a message and report how many paths were redacted
    pub fn sanitize_with_count(&self, message: &str) -> SanitizedMessage {
        let mut paths_redacted = 0usize;
        let redacted = PATH_REGEX.replace_all(message, |caps: &Captures<'_>| {
            paths_redacted += 1;
            format!("{}{}", &caps["lead"], PATH_TOKEN)
        });

        SanitizedMessage {
            text: self.truncate(&redacted),
            paths_redacted,
        }
    }

    fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.max_length {
            return text.to_string();
        }

        let keep = self.max_length - ELLIPSIS.len();
        let mut truncated: String = text.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    }
}

/// Sanitize a message with the default 500-character bound
pub fn sanitize(message: &str) -> String {
    MessageSanitizer::default().sanitize(message)
}
