//! Optional submission step.
//!
//! # Invariants
//! - A configured adapter calls its submitter exactly once per `submit`.
//! - An unconfigured adapter never calls anything and yields an empty receipt.

use crate::capability::{Capability, CapabilityError, Receipt, Submitter};
use crate::model::Tag;
use log::{debug, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// A configured submission capability failed.
#[derive(Debug)]
pub struct SubmissionError {
    pub capability: Capability,
    pub source: CapabilityError,
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} submission failed: {}",
            self.capability.as_str(),
            self.source
        )
    }
}

impl Error for SubmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Wraps one optional [`Submitter`] behind a uniform contract.
#[derive(Clone)]
pub struct PublisherAdapter {
    capability: Capability,
    submitter: Option<Arc<dyn Submitter>>,
}

impl Debug for PublisherAdapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublisherAdapter")
            .field("capability", &self.capability)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl PublisherAdapter {
    pub fn new(capability: Capability, submitter: Option<Arc<dyn Submitter>>) -> Self {
        Self {
            capability,
            submitter,
        }
    }

    /// Adapter with no submitter; every call is a no-op.
    pub fn disabled(capability: Capability) -> Self {
        Self::new(capability, None)
    }

    pub fn is_enabled(&self) -> bool {
        self.submitter.is_some()
    }

    /// Submits `payload` with `tags`.
    ///
    /// Returns `Receipt::empty()` without any remote call when disabled.
    pub async fn submit(&self, payload: Value, tags: &[Tag]) -> Result<Receipt, SubmissionError> {
        let Some(submitter) = &self.submitter else {
            debug!(
                "event=submit module=publish status=skipped capability={}",
                self.capability.as_str()
            );
            return Ok(Receipt::empty());
        };

        match submitter.submit(payload, tags).await {
            Ok(receipt) => {
                debug!(
                    "event=submit module=publish status=ok capability={} id={}",
                    self.capability.as_str(),
                    receipt.id.as_deref().unwrap_or("none")
                );
                Ok(receipt)
            }
            Err(source) => {
                warn!(
                    "event=submit module=publish status=error capability={} error={}",
                    self.capability.as_str(),
                    source
                );
                Err(SubmissionError {
                    capability: self.capability,
                    source,
                })
            }
        }
    }
}
