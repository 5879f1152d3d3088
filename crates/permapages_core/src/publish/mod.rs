//! Publishing steps over caller-supplied submission capabilities.
//!
//! # Responsibility
//! - Give every submission step the same optional-capability contract.
//! - Keep pipeline code free of "is this capability configured" branches.

pub mod adapter;

pub use adapter::{PublisherAdapter, SubmissionError};
