//! Projection of query responses into ordered records.
//!
//! # Responsibility
//! - Walk `data.transactions.edges` and unwrap each `{ node }` wrapper.
//! - Map nodes to records and order them newest first.
//!
//! # Invariants
//! - Ordering is by descending timestamp; equal timestamps keep response order.
//! - An empty edge list is a valid list result, but never a current record.

use crate::model::{LedgerEntry, LedgerRecord};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Path from the response root to the edge list.
pub const EDGES_PATH: &[&str] = &["data", "transactions", "edges"];

/// Projection failures.
#[derive(Debug)]
pub enum ProjectionError {
    /// The response has no edge list at [`EDGES_PATH`].
    MissingPath(String),
    /// The edge list exists but holds no entries.
    Empty,
    /// One edge could not be decoded as an entry.
    MalformedEntry {
        index: usize,
        source: serde_json::Error,
    },
}

impl Display for ProjectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPath(at) => write!(f, "query response has no edge list at `{at}`"),
            Self::Empty => write!(f, "query matched no entries"),
            Self::MalformedEntry { index, source } => {
                write!(f, "edge {index} is not a ledger entry: {source}")
            }
        }
    }
}

impl Error for ProjectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedEntry { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extracts entries in response order.
pub fn extract_entries(response: &Value) -> Result<Vec<LedgerEntry>, ProjectionError> {
    let mut cursor = response;
    for (depth, key) in EDGES_PATH.iter().enumerate() {
        cursor = cursor
            .get(key)
            .ok_or_else(|| ProjectionError::MissingPath(EDGES_PATH[..=depth].join(".")))?;
    }
    let edges = cursor
        .as_array()
        .ok_or_else(|| ProjectionError::MissingPath(EDGES_PATH.join(".")))?;

    edges
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            let node = edge.get("node").cloned().unwrap_or(Value::Null);
            serde_json::from_value::<LedgerEntry>(node)
                .map_err(|source| ProjectionError::MalformedEntry { index, source })
        })
        .collect()
}

/// Sorts records newest first, keeping response order among equal timestamps.
pub fn order_newest_first<R: LedgerRecord>(records: &mut [R]) {
    records.sort_by_key(|record| std::cmp::Reverse(record.timestamp()));
}

/// List mode: every matching record, newest first. Empty is not an error.
pub fn project_list<R: LedgerRecord>(response: &Value) -> Result<Vec<R>, ProjectionError> {
    let entries = extract_entries(response)?;
    let mut records = entries.iter().map(R::from_entry).collect::<Vec<_>>();
    order_newest_first(&mut records);
    Ok(records)
}

/// Single-record mode: the newest record.
///
/// A missing edge list and an empty one both yield `ProjectionError::Empty`.
pub fn project_current<R: LedgerRecord>(response: &Value) -> Result<R, ProjectionError> {
    let records = match project_list::<R>(response) {
        Ok(records) => records,
        Err(ProjectionError::MissingPath(_)) => return Err(ProjectionError::Empty),
        Err(err) => return Err(err),
    };
    records.into_iter().next().ok_or(ProjectionError::Empty)
}
