//! wgts-core
//!
//! Pure domain types and transforms for the oncoanalyser-wgts glue handlers.
//! No AWS SDK or HTTP dependency. The OrcaBus services are reached through
//! the traits in [`services`].

pub mod catalog;
pub mod error;
pub mod merge;
pub mod models;
pub mod outputs;
pub mod resolve;
pub mod s3_uri;
pub mod samplesheet;
pub mod services;
pub mod template;
pub mod version;
