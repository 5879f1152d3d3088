//! Pipeline error taxonomy.
//!
//! # Invariants
//! - `Validation` is only produced before any remote capability is called.
//! - Every remote failure keeps the capability error as its `source()`.

use crate::capability::{Capability, CapabilityError};
use crate::model::ValidationError;
use crate::publish::SubmissionError;
use crate::query::ProjectionError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Failure of one pipeline operation.
#[derive(Debug)]
pub enum PipelineError {
    /// Input record is malformed.
    Validation(ValidationError),
    /// A configured submission step failed.
    Submission(SubmissionError),
    /// The query endpoint failed.
    Query(CapabilityError),
    /// The query response does not have the expected shape.
    Projection(ProjectionError),
    /// A single-record read matched nothing.
    NotFound(String),
    /// The `load` capability failed for one entry id.
    Load { id: String, source: CapabilityError },
    /// A record could not be encoded as a submission payload.
    Encode(serde_json::Error),
}

impl PipelineError {
    /// Capability whose failure caused this error, if any.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Self::Submission(err) => Some(err.capability),
            Self::Query(_) | Self::Projection(_) => Some(Capability::Query),
            Self::Load { .. } => Some(Capability::Load),
            Self::Validation(_) | Self::NotFound(_) | Self::Encode(_) => None,
        }
    }

    /// Short stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Submission(_) => "submission",
            Self::Query(_) | Self::Projection(_) => "query",
            Self::NotFound(_) => "not_found",
            Self::Load { .. } => "load",
            Self::Encode(_) => "encode",
        }
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Submission(err) => write!(f, "{err}"),
            Self::Query(err) => write!(f, "query failed: {err}"),
            Self::Projection(err) => write!(f, "query failed: {err}"),
            Self::NotFound(subject) => write!(f, "no ledger entry found for {subject}"),
            Self::Load { id, source } => write!(f, "failed to load entry {id}: {source}"),
            Self::Encode(err) => write!(f, "failed to encode payload: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Submission(err) => Some(err),
            Self::Query(err) => Some(&**err),
            Self::Projection(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Load { source, .. } => Some(&**source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationError> for PipelineError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SubmissionError> for PipelineError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<ProjectionError> for PipelineError {
    fn from(value: ProjectionError) -> Self {
        Self::Projection(value)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineError;
    use crate::capability::Capability;
    use crate::model::{PageValidationError, ValidationError};
    use std::error::Error;

    #[test]
    fn load_error_exposes_capability_and_source() {
        let err = PipelineError::Load {
            id: "tx-1".to_string(),
            source: "timeout".into(),
        };
        assert_eq!(err.capability(), Some(Capability::Load));
        assert_eq!(err.code(), "load");
        assert!(err.to_string().contains("tx-1"));
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("timeout")
        );
    }

    #[test]
    fn validation_error_has_no_capability() {
        let err = PipelineError::from(ValidationError::from(PageValidationError::EmptyTitle));
        assert_eq!(err.capability(), None);
        assert_eq!(err.to_string(), "invalid page: title must not be empty");
    }
}
