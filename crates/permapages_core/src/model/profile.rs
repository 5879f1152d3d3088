//! Profile record.
//!
//! # Invariants
//! - A validated `handle` is 3..=32 chars of `[A-Za-z0-9_-]` with no
//!   surrounding whitespace.
//! - `owner`, when set, is a well-formed ledger address.
//! - `id` is only set after a successful ledger submission or when mapped
//!   from an existing entry.

use crate::config::ProtocolConfig;
use crate::model::entry::LedgerEntry;
use crate::model::tag::{Tag, TAG_CONTENT_TYPE, TAG_PROFILE_HANDLE, TAG_PROTOCOL, TAG_TIMESTAMP};
use crate::model::{is_valid_address, LedgerRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum bio length in chars.
pub const MAX_BIO_CHARS: usize = 500;

static HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("valid handle regex"));

/// Public profile of one ledger owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar image reference (URL or content id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Unix epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Profile {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            ..Self::default()
        }
    }

    /// Checks required fields and shapes.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let handle = self.handle.trim();
        if handle.is_empty() {
            return Err(ProfileValidationError::EmptyHandle);
        }
        if !HANDLE_RE.is_match(handle) {
            return Err(ProfileValidationError::InvalidHandle(self.handle.clone()));
        }
        if let Some(bio) = &self.bio {
            let len = bio.chars().count();
            if len > MAX_BIO_CHARS {
                return Err(ProfileValidationError::BioTooLong {
                    len,
                    max: MAX_BIO_CHARS,
                });
            }
        }
        if matches!(&self.avatar, Some(avatar) if avatar.trim().is_empty()) {
            return Err(ProfileValidationError::EmptyAvatar);
        }
        if let Some(owner) = &self.owner {
            if !is_valid_address(owner) {
                return Err(ProfileValidationError::InvalidOwner(owner.clone()));
            }
        }
        Ok(())
    }

    /// Consuming form of [`Profile::validate`] used as a pipeline step.
    ///
    /// The returned profile carries the trimmed handle, matching the
    /// `Profile-Handle` tag.
    pub fn validated(self) -> Result<Self, ProfileValidationError> {
        self.validate()?;
        let handle = self.handle.trim().to_string();
        Ok(Self { handle, ..self })
    }

    /// Derives the indexing tags for a validated profile.
    ///
    /// Order: `Protocol`, `Content-Type`, `Profile-Handle`, then `Timestamp`
    /// when set.
    pub fn derive_tags(&self, config: &ProtocolConfig) -> Vec<Tag> {
        let mut tags = vec![
            Tag::new(TAG_PROTOCOL, config.profile_protocol.as_str()),
            Tag::new(TAG_CONTENT_TYPE, config.record_content_type.as_str()),
            Tag::new(TAG_PROFILE_HANDLE, self.handle.trim()),
        ];
        if let Some(timestamp) = self.timestamp {
            tags.push(Tag::new(TAG_TIMESTAMP, timestamp.to_string()));
        }
        tags
    }

    /// Returns a copy with `id` replaced.
    pub fn with_id(self, id: Option<String>) -> Self {
        Self { id, ..self }
    }
}

impl LedgerRecord for Profile {
    fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            handle: entry
                .tag(TAG_PROFILE_HANDLE)
                .unwrap_or_default()
                .to_string(),
            owner: entry.owner_address().map(str::to_string),
            timestamp: entry.timestamp_tag(),
            id: Some(entry.id.clone()),
            ..Self::default()
        }
    }

    fn timestamp(&self) -> i64 {
        self.timestamp.unwrap_or(0)
    }
}

/// Profile validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyHandle,
    InvalidHandle(String),
    BioTooLong { len: usize, max: usize },
    EmptyAvatar,
    InvalidOwner(String),
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "handle must not be empty"),
            Self::InvalidHandle(value) => write!(
                f,
                "handle `{value}` must be 3-32 chars of letters, digits, `_` or `-`"
            ),
            Self::BioTooLong { len, max } => {
                write!(f, "bio has {len} chars, at most {max} allowed")
            }
            Self::EmptyAvatar => write!(f, "avatar must not be blank when set"),
            Self::InvalidOwner(value) => write!(f, "owner is not a ledger address: `{value}`"),
        }
    }
}

impl Error for ProfileValidationError {}

#[cfg(test)]
mod tests {
    use super::{Profile, ProfileValidationError, MAX_BIO_CHARS};
    use crate::config::ProtocolConfig;

    #[test]
    fn validate_rejects_short_handle() {
        let err = Profile::new("ab").validate().expect_err("short handle");
        assert_eq!(err, ProfileValidationError::InvalidHandle("ab".to_string()));
    }

    #[test]
    fn validated_trims_padded_handle() {
        let profile = Profile::new("  rakis \n")
            .validated()
            .expect("padded handle is valid");
        assert_eq!(profile.handle, "rakis");
    }

    #[test]
    fn validate_rejects_long_bio() {
        let mut profile = Profile::new("rakis");
        profile.bio = Some("x".repeat(MAX_BIO_CHARS + 1));
        assert!(matches!(
            profile.validate(),
            Err(ProfileValidationError::BioTooLong { .. })
        ));
    }

    #[test]
    fn tags_include_timestamp_only_when_set() {
        let config = ProtocolConfig::default();
        let mut profile = Profile::new("rakis");
        assert_eq!(profile.derive_tags(&config).len(), 3);

        profile.timestamp = Some(42);
        let tags = profile.derive_tags(&config);
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[3].name, "Timestamp");
        assert_eq!(tags[3].value, "42");
    }
}
