//!
//! Value objects shared by both work log families.
use std::fmt::{self, Formatter};

use serde::Serialize;
use serde_json::Value;

use crate::{fields, JiraError, Result};

/// Compares two resources by their canonical `self` URL.
///
/// Two resources are the same resource iff both URLs are present and
/// equal. A resource without a `self` URL compares unequal to everything,
/// **including itself** — the relation is deliberately not reflexive,
/// which is why the resource types implement `PartialEq` but not `Eq` and
/// must not be used as hash map keys.
#[must_use]
pub fn same_resource(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// The person who logged time, as reported by either endpoint.
///
/// Immutable after construction, and constructed only from a JSON object;
/// a null payload becomes a missing author upstream, never an `Author`
/// with blank fields.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub self_url: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

impl Author {
    #[allow(clippy::missing_errors_doc)]
    pub fn from_json(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(JiraError::MalformedPayload("a JSON object for the author"));
        }
        Ok(Author {
            self_url: fields::get_string(value.get("self")),
            name: fields::get_string(value.get("name")),
            display_name: fields::get_string(value.get("displayName")),
            avatar: fields::get_string(value.get("avatar")),
        })
    }

    /// Verbose form for diagnostics.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        format!(
            "author{{name: {:?}, displayName: {:?}, avatar: {:?}, self: {:?}}}",
            self.name, self.display_name, self.avatar, self.self_url
        )
    }
}

/// Prints the canonical identity, the `self` URL.
impl fmt::Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.self_url.as_deref().unwrap_or_default())
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        same_resource(self.self_url.as_deref(), other.self_url.as_deref())
    }
}
