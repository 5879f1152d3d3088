//! Core publish/query pipelines for Permapages.
//! Profiles and pages are published to, and read back from, an append-only
//! ledger through caller-supplied capabilities.

pub mod capability;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod publish;
pub mod query;
pub mod service;
pub mod template;

pub use capability::{
    Capability, CapabilityError, CapabilityResult, QueryEndpoint, Receipt, RecordLoader, Submitter,
};
pub use config::{ConfigError, ProtocolConfig};
pub use error::{PipelineError, PipelineResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::{
    LedgerEntry, LedgerRecord, Page, PageValidationError, Profile, ProfileValidationError, Tag,
    ValidationError,
};
pub use publish::{PublisherAdapter, SubmissionError};
pub use query::{build_query, ProjectionError, QueryIntent};
pub use service::page_service::{PageService, PurchaseRequest};
pub use service::profile_service::ProfileService;
pub use service::Progress;
pub use template::{render_document, WebpageDocument};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
