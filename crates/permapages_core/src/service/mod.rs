//! Publish/query pipelines.
//!
//! # Responsibility
//! - Compose validation, tagging, querying, projection and submission into
//!   the public profile and page operations.
//! - Translate step failures into `PipelineError`.
//!
//! # Invariants
//! - Steps of one operation run strictly in sequence; the first failure
//!   stops the chain.
//! - Only [`best_effort`] converts failures into absence. No other operation
//!   swallows errors.

pub mod page_service;
pub mod profile_service;

use crate::capability::{QueryEndpoint, RecordLoader};
use crate::config::ProtocolConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::model::{Page, Profile};
use crate::query::{build_query, QueryIntent};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Progress event emitted by long publish operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub step: u32,
    pub message: &'static str,
}

impl Progress {
    /// Emitted once the rendered document is stored.
    pub const GENERATING_PAGE: Progress = Progress {
        step: 1,
        message: "generating page",
    };
    /// Emitted once the page record is on the ledger.
    pub const DEPLOYING_PAGE: Progress = Progress {
        step: 2,
        message: "deploying page",
    };
}

/// Runs one query and returns the raw response body.
pub(crate) async fn execute_query(
    endpoint: &dyn QueryEndpoint,
    intent: &QueryIntent<'_>,
    config: &ProtocolConfig,
) -> PipelineResult<Value> {
    let query = build_query(intent, config);
    match endpoint.query(&query).await {
        Ok(response) => {
            debug!(
                "event=query module=service status=ok intent={}",
                intent.name()
            );
            Ok(response)
        }
        Err(err) => {
            warn!(
                "event=query module=service status=error intent={} error={}",
                intent.name(),
                err
            );
            Err(PipelineError::Query(err))
        }
    }
}

/// A record addressed by its ledger entry id.
pub(crate) trait StoredRecord: Sized {
    fn entry_id(&self) -> Option<&str>;
    fn with_entry_id(self, id: String) -> Self;
}

impl StoredRecord for Profile {
    fn entry_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_entry_id(self, id: String) -> Self {
        self.with_id(Some(id))
    }
}

impl StoredRecord for Page {
    fn entry_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_entry_id(self, id: String) -> Self {
        self.with_id(Some(id))
    }
}

/// Loads the record stored in entry `id`.
///
/// A record returned without an id gets `id` merged in.
pub(crate) async fn load_record<R: StoredRecord>(
    loader: &dyn RecordLoader<R>,
    id: &str,
) -> PipelineResult<R> {
    let record = loader
        .load(id)
        .await
        .map_err(|source| PipelineError::Load {
            id: id.to_string(),
            source,
        })?;
    if record.entry_id().is_some() {
        return Ok(record);
    }
    Ok(record.with_entry_id(id.to_string()))
}

/// Best-effort read: any failure becomes `None`.
///
/// Absence of data and failure are indistinguishable to the caller; the
/// failure is only visible in the log.
pub(crate) async fn best_effort<T, F>(operation: &'static str, future: F) -> Option<T>
where
    F: Future<Output = PipelineResult<T>>,
{
    match future.await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event={} module=service status=error code={} error={}",
                operation,
                err.code(),
                err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{best_effort, Progress};
    use crate::error::PipelineError;

    #[tokio::test]
    async fn best_effort_keeps_success_and_drops_failure() {
        assert_eq!(
            best_effort("lookup", async { Ok::<_, PipelineError>(7) }).await,
            Some(7)
        );
        let missing = best_effort("lookup", async {
            Err::<u8, _>(PipelineError::NotFound("nobody".to_string()))
        })
        .await;
        assert_eq!(missing, None);
    }

    #[test]
    fn progress_steps_serialize_as_step_and_message() {
        let value = serde_json::to_value(Progress::GENERATING_PAGE).expect("progress encodes");
        assert_eq!(
            value,
            serde_json::json!({"step": 1, "message": "generating page"})
        );
        assert_eq!(Progress::DEPLOYING_PAGE.step, 2);
    }
}
