//! Domain records published to and read back from the ledger.
//!
//! # Responsibility
//! - Define `Profile` and `Page` records plus the raw `LedgerEntry` shape.
//! - Own record validation and tag derivation.
//!
//! # Invariants
//! - Tags are derived only from records that passed validation.
//! - Tag derivation is a pure function of record fields and protocol config.
//! - Records mapped from ledger entries always carry an `id`.

pub mod entry;
pub mod page;
pub mod profile;
pub mod tag;

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use entry::LedgerEntry;
pub use page::{Page, PageValidationError};
pub use profile::{Profile, ProfileValidationError};
pub use tag::Tag;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{43}$").expect("valid address regex"));

/// Returns whether `value` has the shape of a ledger owner address.
pub fn is_valid_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

/// A record that can be projected from a ledger entry and ordered by time.
pub trait LedgerRecord: Sized {
    /// Maps one entry to a record. Must be total.
    fn from_entry(entry: &LedgerEntry) -> Self;

    /// Ordering key; larger is newer.
    fn timestamp(&self) -> i64;
}

/// Validation failure for any record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Profile(ProfileValidationError),
    Page(PageValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile(err) => write!(f, "invalid profile: {err}"),
            Self::Page(err) => write!(f, "invalid page: {err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Profile(err) => Some(err),
            Self::Page(err) => Some(err),
        }
    }
}

impl From<ProfileValidationError> for ValidationError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Profile(value)
    }
}

impl From<PageValidationError> for ValidationError {
    fn from(value: PageValidationError) -> Self {
        Self::Page(value)
    }
}
