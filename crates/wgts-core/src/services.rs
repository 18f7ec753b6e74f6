//! Collaborator seams.
//!
//! The resolver and the workflow-run merger read from two OrcaBus services.
//! Implementations live in `wgts-orcabus`; tests use in-memory fakes.

use crate::error::ServiceError;
use crate::models::object::StoredObject;
use crate::models::workflow::{Payload, WorkflowRun};

/// Maps a portal run id to the objects stored for that run.
pub trait ObjectListing: Send + Sync {
    /// Objects in whatever order the service returns them.
    fn list_objects(&self, portal_run_id: &str) -> Result<Vec<StoredObject>, ServiceError>;
}

/// Workflow run records and their payloads.
pub trait WorkflowMetadata: Send + Sync {
    fn workflow_run(&self, portal_run_id: &str) -> Result<WorkflowRun, ServiceError>;

    /// Payload attached to the most recent state of the run.
    fn latest_payload(&self, portal_run_id: &str) -> Result<Payload, ServiceError>;
}
