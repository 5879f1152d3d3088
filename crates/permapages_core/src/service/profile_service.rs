//! Profile pipeline.
//!
//! # Responsibility
//! - Resolve the current profile of an owner address.
//! - Validate, tag and submit new profile versions.
//!
//! # Invariants
//! - `get` never fails; every failure is reported as `None`.
//! - `create` propagates every failure.
//! - A returned profile always carries an `id`.

use crate::capability::{Capability, QueryEndpoint, RecordLoader, Submitter};
use crate::config::ProtocolConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::model::{Profile, ValidationError};
use crate::publish::PublisherAdapter;
use crate::query::{project_current, ProjectionError, QueryIntent};
use crate::service::{best_effort, execute_query, load_record};
use log::info;
use std::sync::Arc;

/// Profile use-case service over injected ledger capabilities.
pub struct ProfileService {
    config: ProtocolConfig,
    query: Arc<dyn QueryEndpoint>,
    loader: Arc<dyn RecordLoader<Profile>>,
    ledger: PublisherAdapter,
}

impl ProfileService {
    /// Creates a read-capable service; submission stays disabled until
    /// [`ProfileService::with_ledger`] is called.
    pub fn new(query: Arc<dyn QueryEndpoint>, loader: Arc<dyn RecordLoader<Profile>>) -> Self {
        Self {
            config: ProtocolConfig::default(),
            query,
            loader,
            ledger: PublisherAdapter::disabled(Capability::Ledger),
        }
    }

    pub fn with_config(mut self, config: ProtocolConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches the ledger-entry submission capability (`post`).
    pub fn with_ledger(mut self, submitter: Arc<dyn Submitter>) -> Self {
        self.ledger = PublisherAdapter::new(Capability::Ledger, Some(submitter));
        self
    }

    /// Returns the current profile of `address`, or `None` on any failure.
    pub async fn get(&self, address: &str) -> Option<Profile> {
        best_effort("profile_get", self.try_get(address)).await
    }

    /// Propagating form of [`ProfileService::get`].
    ///
    /// Steps: query by owner, select the newest entry, load its content.
    pub async fn try_get(&self, address: &str) -> PipelineResult<Profile> {
        let response = execute_query(
            self.query.as_ref(),
            &QueryIntent::ProfileByOwner(address),
            &self.config,
        )
        .await?;

        let current = match project_current::<Profile>(&response) {
            Ok(profile) => profile,
            Err(ProjectionError::Empty) => {
                return Err(PipelineError::NotFound(format!("profile owner {address}")))
            }
            Err(err) => return Err(err.into()),
        };
        let id = current.id.unwrap_or_default();

        let profile = self.load(&id).await?;
        info!(
            "event=profile_get module=service status=ok owner={} id={}",
            address, id
        );
        Ok(profile)
    }

    /// Loads the full profile stored in entry `id`.
    pub async fn load(&self, id: &str) -> PipelineResult<Profile> {
        load_record(self.loader.as_ref(), id).await
    }

    /// Publishes a new profile version.
    ///
    /// Steps: validate, derive tags, submit, merge the returned id.
    pub async fn create(&self, profile: Profile) -> PipelineResult<Profile> {
        let profile = profile.validated().map_err(ValidationError::from)?;
        let tags = profile.derive_tags(&self.config);
        let payload = serde_json::to_value(&profile)?;

        let receipt = self.ledger.submit(payload, &tags).await?;
        info!(
            "event=profile_create module=service status=ok handle={} id={}",
            profile.handle,
            receipt.id.as_deref().unwrap_or("none")
        );
        Ok(profile.with_id(receipt.id))
    }
}
