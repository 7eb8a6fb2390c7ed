//! Host capability detection
//!
//! Reports which browser-only APIs a fragment references. A reference counts
//! only when the identifier stands on its own (not as a member of another
//! object, not as part of a longer name) and is called or dereferenced.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::HostApi;

// Excludes `.name`, `$name` and longer identifiers ending in the name
const STANDALONE: &str = r"(?:^|[^\w$.])";

static HOST_API_PATTERNS: Lazy<Vec<(HostApi, Regex)>> = Lazy::new(|| {
    HostApi::ALL
        .iter()
        .map(|api| {
            let shape = match api {
                HostApi::Fetch => r"\s*\(",
                _ => r"\s*[.\[]",
            };
            let source = format!("{STANDALONE}{}{shape}", api.identifier());
            (*api, Regex::new(&source).expect("valid regex"))
        })
        .collect()
});

/// Detects references to host-only APIs
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityDetector;

impl CapabilityDetector {
    pub fn new() -> Self {
        Self
    }

    /// Referenced host APIs, in [`HostApi::ALL`] order
    pub fn detect(&self, text: &str) -> Vec<HostApi> {
        HOST_API_PATTERNS
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(api, _)| *api)
            .collect()
    }

    /// True if the fragment needs a browser-like host
    pub fn requires_host(&self, text: &str) -> bool {
        HOST_API_PATTERNS.iter().any(|(_, regex)| regex.is_match(text))
    }
}

/// True if `text` references any host-only API
pub fn references_host_apis(text: &str) -> bool {
    CapabilityDetector.requires_host(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fetch('/api')", HostApi::Fetch)]
    #[case("await fetch (url)", HostApi::Fetch)]
    #[case("window.alert(1)", HostApi::Window)]
    #[case("window['x']", HostApi::Window)]
    #[case("document.getElementById('a')", HostApi::Document)]
    #[case("localStorage.getItem('k')", HostApi::LocalStorage)]
    #[case("sessionStorage.setItem('k', v)", HostApi::SessionStorage)]
    #[case("navigator.userAgent", HostApi::Navigator)]
    #[case("location.reload()", HostApi::Location)]
    fn test_detects_each_api(#[case] source: &str, #[case] api: HostApi) {
        assert_eq!(CapabilityDetector::new().detect(source), vec![api]);
    }

    #[rstest]
    #[case("function fetchData() { return 1; }")]
    #[case("const d = new DataFetcher();")]
    #[case("client.fetch(url)")]
    #[case("const windowSize = 3;")]
    #[case("$document.query()")]
    #[case("const s = 'document';")]
    #[case("function add(a, b) { return a + b; }")]
    fn test_ignores_non_host_references(#[case] source: &str) {
        assert!(!references_host_apis(source), "{source}");
    }

    #[test]
    fn test_reports_in_fixed_order() {
        let source = "location.href; fetch(x); document.title; window.open()";
        assert_eq!(
            CapabilityDetector::new().detect(source),
            vec![HostApi::Fetch, HostApi::Window, HostApi::Document, HostApi::Location]
        );
    }

    #[test]
    fn test_window_location_counts_as_window_only() {
        assert_eq!(
            CapabilityDetector::new().detect("window.location = '/'"),
            vec![HostApi::Window]
        );
    }
}
