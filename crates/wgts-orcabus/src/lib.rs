//! wgts-orcabus
//!
//! Blocking HTTP bindings for the OrcaBus file and workflow managers,
//! implementing the collaborator traits from `wgts-core`.

pub mod client;
pub mod error;
pub mod filemanager;
pub mod secrets;
pub mod workflow;

pub use client::OrcabusClient;
pub use error::ApiError;
