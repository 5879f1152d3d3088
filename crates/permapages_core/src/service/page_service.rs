//! Page pipeline.
//!
//! # Responsibility
//! - Render, store and deploy pages, reporting progress.
//! - List an owner's pages and the application's deploy history.
//! - Forward name registrations to the registry capability.
//!
//! # Invariants
//! - A failed step suppresses every later step and notification.
//! - `list`, `lookup` and `history` return newest first; empty is success.

use crate::capability::{Capability, QueryEndpoint, Receipt, RecordLoader, Submitter};
use crate::config::ProtocolConfig;
use crate::error::PipelineResult;
use crate::model::{LedgerEntry, Page, ValidationError};
use crate::publish::PublisherAdapter;
use crate::query::{project_list, QueryIntent};
use crate::service::{execute_query, load_record, Progress};
use crate::template::WebpageDocument;
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// Payload of a page name registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub name: String,
    pub owner: String,
    pub transaction_id: String,
}

/// Page use-case service over injected ledger capabilities.
pub struct PageService {
    config: ProtocolConfig,
    query: Arc<dyn QueryEndpoint>,
    loader: Arc<dyn RecordLoader<Page>>,
    ledger: PublisherAdapter,
    content_store: PublisherAdapter,
    registry: PublisherAdapter,
}

impl PageService {
    /// Creates a read-capable service; every submission step is disabled
    /// until attached with the `with_*` methods.
    pub fn new(query: Arc<dyn QueryEndpoint>, loader: Arc<dyn RecordLoader<Page>>) -> Self {
        Self {
            config: ProtocolConfig::default(),
            query,
            loader,
            ledger: PublisherAdapter::disabled(Capability::Ledger),
            content_store: PublisherAdapter::disabled(Capability::ContentStore),
            registry: PublisherAdapter::disabled(Capability::Registry),
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

    /// Attaches the rendered-document store (`postWebpage`).
    pub fn with_content_store(mut self, submitter: Arc<dyn Submitter>) -> Self {
        self.content_store = PublisherAdapter::new(Capability::ContentStore, Some(submitter));
        self
    }

    /// Attaches the name registry (`register`).
    pub fn with_registry(mut self, submitter: Arc<dyn Submitter>) -> Self {
        self.registry = PublisherAdapter::new(Capability::Registry, Some(submitter));
        self
    }

    /// Renders, stores and deploys a page.
    ///
    /// `notify` receives [`Progress::GENERATING_PAGE`] after the document is
    /// stored and [`Progress::DEPLOYING_PAGE`] after the record is deployed.
    /// A failing step suppresses the notifications that follow it.
    pub async fn create<F>(&self, page: Page, mut notify: F) -> PipelineResult<Page>
    where
        F: FnMut(Progress),
    {
        let page = page.validated().map_err(ValidationError::from)?;

        let stored = self.store_document(&page).await?;
        let page = page.with_webpage(stored.id);
        self.report(&mut notify, Progress::GENERATING_PAGE);

        let tags = page.derive_tags(&self.config);
        let payload = serde_json::to_value(&page)?;
        let deployed = self.ledger.submit(payload, &tags).await?;
        let page = page.with_id(deployed.id);
        self.report(&mut notify, Progress::DEPLOYING_PAGE);

        info!(
            "event=page_create module=service status=ok id={} webpage={}",
            page.id.as_deref().unwrap_or("none"),
            page.webpage.as_deref().unwrap_or("none")
        );
        Ok(page)
    }

    /// Renders and stores a page document without deploying a record.
    ///
    /// Returns the content store receipt as is.
    pub async fn publish(&self, page: &Page) -> PipelineResult<Receipt> {
        self.store_document(page).await
    }

    /// Registers `name` for `owner`, paid by `transaction_id`.
    pub async fn purchase(
        &self,
        name: &str,
        owner: &str,
        transaction_id: &str,
    ) -> PipelineResult<Receipt> {
        let request = PurchaseRequest {
            name: name.to_string(),
            owner: owner.to_string(),
            transaction_id: transaction_id.to_string(),
        };
        let receipt = self
            .registry
            .submit(serde_json::to_value(&request)?, &[])
            .await?;
        info!(
            "event=page_purchase module=service status=ok name={} owner={}",
            name, owner
        );
        Ok(receipt)
    }

    /// Lists the pages owned by `account`, newest first.
    pub async fn list(&self, account: &str) -> PipelineResult<Vec<Page>> {
        let response = execute_query(
            self.query.as_ref(),
            &QueryIntent::PagesByOwner(account),
            &self.config,
        )
        .await?;
        Ok(project_list::<Page>(&response)?)
    }

    /// Resolves pages by entry id, newest first.
    pub async fn lookup(&self, ids: &[String]) -> PipelineResult<Vec<Page>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let response =
            execute_query(self.query.as_ref(), &QueryIntent::ByIds(ids), &self.config).await?;
        Ok(project_list::<Page>(&response)?)
    }

    /// Loads the full page stored in entry `id`.
    pub async fn get(&self, id: &str) -> PipelineResult<Page> {
        load_record(self.loader.as_ref(), id).await
    }

    /// Lists every application deploy entry (id only), newest first.
    pub async fn history(&self) -> PipelineResult<Vec<LedgerEntry>> {
        let response = execute_query(
            self.query.as_ref(),
            &QueryIntent::DeployHistory,
            &self.config,
        )
        .await?;
        Ok(project_list::<LedgerEntry>(&response)?)
    }

    async fn store_document(&self, page: &Page) -> PipelineResult<Receipt> {
        let document =
            WebpageDocument::render(&self.config, &page.title, &page.description, &page.html);
        let payload = serde_json::to_value(&document)?;
        Ok(self.content_store.submit(payload, &[]).await?)
    }

    fn report<F: FnMut(Progress)>(&self, notify: &mut F, progress: Progress) {
        info!(
            "event=page_progress module=service status=ok step={} message={}",
            progress.step, progress.message
        );
        notify(progress);
    }
}
