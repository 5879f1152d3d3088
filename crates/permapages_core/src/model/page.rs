//! Page record.
//!
//! # Invariants
//! - `title` and `html` are non-blank; `description` may be empty.
//! - `webpage` is the content id of the rendered document.
//! - `size` and `block` are ledger metadata filled only by listing and are
//!   passed through untouched.

use crate::config::ProtocolConfig;
use crate::model::entry::LedgerEntry;
use crate::model::tag::{
    Tag, TAG_CONTENT_TYPE, TAG_PAGE_DESCRIPTION, TAG_PAGE_TITLE, TAG_PAGE_WEBPAGE, TAG_PROTOCOL,
    TAG_TIMESTAMP,
};
use crate::model::{is_valid_address, LedgerRecord};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MAX_TITLE_CHARS: usize = 120;
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// A user web page published as a standalone document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Page body; rendered into the document template on publish.
    #[serde(default)]
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
}

impl Page {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            html: html.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), PageValidationError> {
        if self.title.trim().is_empty() {
            return Err(PageValidationError::EmptyTitle);
        }
        let title_len = self.title.chars().count();
        if title_len > MAX_TITLE_CHARS {
            return Err(PageValidationError::TitleTooLong {
                len: title_len,
                max: MAX_TITLE_CHARS,
            });
        }
        let description_len = self.description.chars().count();
        if description_len > MAX_DESCRIPTION_CHARS {
            return Err(PageValidationError::DescriptionTooLong {
                len: description_len,
                max: MAX_DESCRIPTION_CHARS,
            });
        }
        if self.html.trim().is_empty() {
            return Err(PageValidationError::EmptyHtml);
        }
        if let Some(owner) = &self.owner {
            if !is_valid_address(owner) {
                return Err(PageValidationError::InvalidOwner(owner.clone()));
            }
        }
        Ok(())
    }

    /// Consuming form of [`Page::validate`] used as a pipeline step.
    pub fn validated(self) -> Result<Self, PageValidationError> {
        self.validate()?;
        Ok(self)
    }

    /// Derives the indexing tags for a validated page.
    ///
    /// Order: `Protocol`, `Content-Type`, `Page-Title`, `Page-Description`,
    /// then `Page-Webpage` and `Timestamp` when set.
    pub fn derive_tags(&self, config: &ProtocolConfig) -> Vec<Tag> {
        let mut tags = vec![
            Tag::new(TAG_PROTOCOL, config.pages_protocol.as_str()),
            Tag::new(TAG_CONTENT_TYPE, config.record_content_type.as_str()),
            Tag::new(TAG_PAGE_TITLE, self.title.as_str()),
            Tag::new(TAG_PAGE_DESCRIPTION, self.description.as_str()),
        ];
        if let Some(webpage) = &self.webpage {
            tags.push(Tag::new(TAG_PAGE_WEBPAGE, webpage.as_str()));
        }
        if let Some(timestamp) = self.timestamp {
            tags.push(Tag::new(TAG_TIMESTAMP, timestamp.to_string()));
        }
        tags
    }

    pub fn with_webpage(self, webpage: Option<String>) -> Self {
        Self { webpage, ..self }
    }

    pub fn with_id(self, id: Option<String>) -> Self {
        Self { id, ..self }
    }
}

impl LedgerRecord for Page {
    fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            title: entry.tag(TAG_PAGE_TITLE).unwrap_or_default().to_string(),
            description: entry
                .tag(TAG_PAGE_DESCRIPTION)
                .unwrap_or_default()
                .to_string(),
            html: String::new(),
            owner: entry.owner_address().map(str::to_string),
            timestamp: entry.timestamp_tag(),
            webpage: entry.tag(TAG_PAGE_WEBPAGE).map(str::to_string),
            id: Some(entry.id.clone()),
            size: entry.size(),
            block: entry.block_id().map(str::to_string),
        }
    }

    fn timestamp(&self) -> i64 {
        self.timestamp.unwrap_or(0)
    }
}

/// Page validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageValidationError {
    EmptyTitle,
    TitleTooLong { len: usize, max: usize },
    DescriptionTooLong { len: usize, max: usize },
    EmptyHtml,
    InvalidOwner(String),
}

impl Display for PageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { len, max } => {
                write!(f, "title has {len} chars, at most {max} allowed")
            }
            Self::DescriptionTooLong { len, max } => {
                write!(f, "description has {len} chars, at most {max} allowed")
            }
            Self::EmptyHtml => write!(f, "html body must not be empty"),
            Self::InvalidOwner(value) => write!(f, "owner is not a ledger address: `{value}`"),
        }
    }
}

impl Error for PageValidationError {}

#[cfg(test)]
mod tests {
    use super::{Page, PageValidationError};
    use crate::config::ProtocolConfig;
    use crate::model::{LedgerEntry, LedgerRecord, Tag};

    #[test]
    fn validate_accepts_empty_description() {
        Page::new("T", "", "<p>x</p>")
            .validate()
            .expect("empty description is allowed");
    }

    #[test]
    fn validate_rejects_blank_html() {
        let err = Page::new("T", "D", "  ")
            .validate()
            .expect_err("blank html");
        assert_eq!(err, PageValidationError::EmptyHtml);
    }

    #[test]
    fn derived_tags_round_trip_through_entry_mapping() {
        let config = ProtocolConfig::default();
        let mut page = Page::new("Title", "Desc", "<p>x</p>").with_webpage(Some("W1".into()));
        page.timestamp = Some(30);

        let mut entry = LedgerEntry::new("P1");
        entry.tags = page.derive_tags(&config);
        assert_eq!(entry.tags[0], Tag::new("Protocol", "PermaPages-v0.3"));

        let mapped = Page::from_entry(&entry);
        assert_eq!(mapped.title, "Title");
        assert_eq!(mapped.description, "Desc");
        assert_eq!(mapped.webpage.as_deref(), Some("W1"));
        assert_eq!(mapped.id.as_deref(), Some("P1"));
        assert_eq!(mapped.timestamp(), 30);
    }
}
