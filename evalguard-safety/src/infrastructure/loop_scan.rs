//! Structural scan for loops that can never terminate
//!
//! A loop head of `while (true)` or `for (;;)` is flagged unless its body
//! contains a `break` token. Bodies are delimited by brace matching; a
//! brace-less body runs to the next `;`. A `do { ... } while (true)` tail
//! uses the preceding `do` block as its body.
//!
//! Brace matching is lexical: braces inside string literals are counted.

use once_cell::sync::Lazy;
use regex::Regex;

static LOOP_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bwhile\s*\(\s*true\s*\)|\bfor\s*\(\s*;\s*;\s*\)").expect("valid regex")
});

static BREAK_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bbreak\b").expect("valid regex"));

static DO_KEYWORD_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdo\s*$").expect("valid regex"));

/// Byte offset of the first unbounded loop head in `text`
pub fn first_unbounded_loop(text: &str) -> Option<usize> {
    LOOP_HEAD.find_iter(text).find_map(|head| {
        let body = if head.as_str().starts_with("while") {
            do_block_before(text, head.start()).unwrap_or_else(|| body_after(text, head.end()))
        } else {
            body_after(text, head.end())
        };

        (!BREAK_TOKEN.is_match(body)).then_some(head.start())
    })
}

fn body_after(text: &str, from: usize) -> &str {
    let rest = &text[from..];
    let trimmed = rest.trim_start();
    let start = from + (rest.len() - trimmed.len());

    if trimmed.starts_with('{') {
        let open = start;
        match matching_close(text, open) {
            Some(close) => &text[open + 1..close],
            None => &text[open + 1..],
        }
    } else {
        match trimmed.find(';') {
            Some(end) => &trimmed[..end],
            None => trimmed,
        }
    }
}

fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn do_block_before(text: &str, head_start: usize) -> Option<&str> {
    let before = text[..head_start].trim_end();
    if !before.ends_with('}') {
        return None;
    }
    let close = before.len() - 1;

    let mut depth = 0usize;
    for (idx, ch) in before.char_indices().rev() {
        match ch {
            '}' => depth += 1,
            '{' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return DO_KEYWORD_TAIL
                        .is_match(&text[..idx])
                        .then(|| &text[idx + 1..close]);
                }
            }
            _ => {}
        }
    }
    None
}
