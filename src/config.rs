use serde::{Deserialize, Serialize};

/// Revision both families default to.
pub const DEFAULT_API_REV: &str = "3";

/// REST API revisions for the two resource families.
///
/// The revision is a path segment embedded in every base URI built for its
/// family. It is owned by the client instance issuing requests, and base
/// URIs are computed at call time rather than cached, so changing a
/// revision affects all subsequent URI construction on that client.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct RestConfig {
    /// Revision of the native Jira REST API (`/rest/api/{rev}/`).
    pub api_rev: String,
    /// Revision of the Tempo timesheet plugin (`/rest/tempo-timesheets/{rev}/`).
    pub tempo_api_rev: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        RestConfig {
            api_rev: DEFAULT_API_REV.to_string(),
            tempo_api_rev: DEFAULT_API_REV.to_string(),
        }
    }
}

impl RestConfig {
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("/rest/api/{}/", self.api_rev)
    }

    #[must_use]
    pub fn tempo_base(&self) -> String {
        format!("/rest/tempo-timesheets/{}/", self.tempo_api_rev)
    }

    /// Authentication sub-resource of the Tempo family.
    #[must_use]
    pub fn tempo_auth_base(&self) -> String {
        format!("/rest/auth/{}/", self.tempo_api_rev)
    }
}
