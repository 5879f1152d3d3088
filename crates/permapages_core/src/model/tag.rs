//! Ledger tag model.

use serde::{Deserialize, Serialize};

/// Schema/version tag attached to every record entry.
pub const TAG_PROTOCOL: &str = "Protocol";
pub const TAG_CONTENT_TYPE: &str = "Content-Type";
/// Record creation time in unix epoch milliseconds.
pub const TAG_TIMESTAMP: &str = "Timestamp";
/// Marks application deploy manifests.
pub const TAG_DEPLOY: &str = "DEPLOY";
pub const TAG_PROFILE_HANDLE: &str = "Profile-Handle";
pub const TAG_PAGE_TITLE: &str = "Page-Title";
pub const TAG_PAGE_DESCRIPTION: &str = "Page-Description";
pub const TAG_PAGE_WEBPAGE: &str = "Page-Webpage";

/// One `(name, value)` indexing pair on a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Returns the value of the first tag named `name`.
pub fn find_tag<'a>(tags: &'a [Tag], name: &str) -> Option<&'a str> {
    tags.iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.value.as_str())
}
