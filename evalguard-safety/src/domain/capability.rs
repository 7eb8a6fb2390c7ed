//! Host-only API identifiers

use serde::{Deserialize, Serialize};

/// Host (browser) APIs that make a fragment non-portable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostApi {
    Fetch,
    Window,
    Document,
    LocalStorage,
    SessionStorage,
    Navigator,
    Location,
}

impl HostApi {
    /// Every host API, in reporting order
    pub const ALL: [HostApi; 7] = [
        HostApi::Fetch,
        HostApi::Window,
        HostApi::Document,
        HostApi::LocalStorage,
        HostApi::SessionStorage,
        HostApi::Navigator,
        HostApi::Location,
    ];

    /// The JavaScript identifier for this API
    pub fn identifier(&self) -> &'static str {
        match self {
            HostApi::Fetch => "fetch",
            HostApi::Window => "window",
            HostApi::Document => "document",
            HostApi::LocalStorage => "localStorage",
            HostApi::SessionStorage => "sessionStorage",
            HostApi::Navigator => "navigator",
            HostApi::Location => "location",
        }
    }
}

impl std::fmt::Display for HostApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}
