//! Caller-supplied remote capabilities.
//!
//! The core never talks to the network itself. Every remote effect goes
//! through one of the traits below, injected when a pipeline is built.

use crate::model::tag::Tag;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;

/// Error type produced by capability implementations.
pub type CapabilityError = Box<dyn Error + Send + Sync>;

/// Result alias for capability calls.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Names the remote capability a step depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Query,
    Load,
    Ledger,
    ContentStore,
    Registry,
}

impl Capability {
    /// Stable string id used in log events and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Load => "load",
            Self::Ledger => "ledger",
            Self::ContentStore => "content_store",
            Self::Registry => "registry",
        }
    }
}

/// Result of one submission.
///
/// `id` is `None` when the submission step was not configured. Any other
/// fields returned by the remote side are kept in `details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Receipt {
    /// Receipt carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            details: Map::new(),
        }
    }

    /// Receipt of a skipped submission.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The `gql` capability: executes one query string.
#[async_trait]
pub trait QueryEndpoint: Send + Sync {
    /// Returns the response body; entries live at `data.transactions.edges`.
    async fn query(&self, query: &str) -> CapabilityResult<Value>;
}

/// The `load` capability: fetches one fully-populated record by entry id.
#[async_trait]
pub trait RecordLoader<R>: Send + Sync {
    async fn load(&self, id: &str) -> CapabilityResult<R>;
}

/// A submission capability (`post`, `postWebpage`, `register`).
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: Value, tags: &[Tag]) -> CapabilityResult<Receipt>;
}
