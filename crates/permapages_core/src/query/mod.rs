//! Query building and response projection.
//!
//! # Responsibility
//! - Render query strings per intent.
//! - Turn nested query responses into ordered domain records.

pub mod builder;
pub mod projector;

pub use builder::{build_query, QueryIntent};
pub use projector::{
    extract_entries, order_newest_first, project_current, project_list, ProjectionError,
};
