//! Ledger entry as returned by the query endpoint.
//!
//! # Invariants
//! - Entries are immutable; the core never edits one after decoding.
//! - An entry without a parsable `Timestamp` tag sorts as timestamp `0`.

use crate::model::tag::{find_tag, Tag, TAG_TIMESTAMP};
use crate::model::LedgerRecord;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One ledger transaction node.
///
/// Only `id` is guaranteed; the other fields are present when the query
/// requested them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataInfo {
    /// Byte size; the index reports it as a decimal string.
    #[serde(deserialize_with = "deserialize_size")]
    pub size: u64,
}

/// Containing block; absent while the entry is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub id: String,
}

impl LedgerEntry {
    /// Creates an id-only entry.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: None,
            tags: Vec::new(),
            data: None,
            block: None,
        }
    }

    pub fn owner_address(&self) -> Option<&str> {
        self.owner.as_ref().map(|owner| owner.address.as_str())
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        find_tag(&self.tags, name)
    }

    /// Timestamp carried by the `Timestamp` tag, if parsable.
    pub fn timestamp_tag(&self) -> Option<i64> {
        self.tag(TAG_TIMESTAMP)
            .and_then(|value| value.trim().parse::<i64>().ok())
    }

    pub fn size(&self) -> Option<u64> {
        self.data.as_ref().map(|data| data.size)
    }

    pub fn block_id(&self) -> Option<&str> {
        self.block.as_ref().map(|block| block.id.as_str())
    }
}

impl LedgerRecord for LedgerEntry {
    fn from_entry(entry: &LedgerEntry) -> Self {
        entry.clone()
    }

    fn timestamp(&self) -> i64 {
        self.timestamp_tag().unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Number(u64),
    Text(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeRepr::deserialize(deserializer)? {
        SizeRepr::Number(value) => Ok(value),
        SizeRepr::Text(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|err| D::Error::custom(format!("invalid data size `{value}`: {err}"))),
    }
}
