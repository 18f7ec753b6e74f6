//! Workflow manager: runs, their states and payloads.

use jiff::Timestamp;
use serde::Deserialize;
use tracing::debug;
use wgts_core::error::ServiceError;
use wgts_core::models::workflow::{Payload, WorkflowRun};
use wgts_core::services::WorkflowMetadata;

use crate::client::OrcabusClient;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct Paginated<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateRecord {
    status: String,
    timestamp: Timestamp,
    #[serde(default)]
    payload: Option<String>,
}

impl OrcabusClient {
    /// The workflow run registered under `portal_run_id`.
    pub fn find_workflow_run(&self, portal_run_id: &str) -> Result<WorkflowRun, ApiError> {
        let url = self.workflow_url("workflowrun");
        let page: Paginated<WorkflowRun> = self.get_json(&url, &[("portalRunId", portal_run_id)])?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("workflow run {portal_run_id}")))
    }

    /// Payload attached to the newest state of the run that carries one.
    pub fn find_latest_payload(&self, portal_run_id: &str) -> Result<Payload, ApiError> {
        let run = self.find_workflow_run(portal_run_id)?;
        let url = self.workflow_url(&format!("workflowrun/{}/state", run.orcabus_id));
        let states: Vec<StateRecord> = self.get_json(&url, &[])?;

        let (status, payload_id) = states
            .into_iter()
            .filter_map(|state| {
                let payload = state.payload.filter(|id| !id.is_empty())?;
                Some((state.timestamp, state.status, payload))
            })
            .max_by_key(|(timestamp, _, _)| *timestamp)
            .map(|(_, status, payload)| (status, payload))
            .ok_or_else(|| ApiError::NotFound(format!("payload for workflow run {portal_run_id}")))?;

        debug!(portal_run_id, %status, payload_id = %payload_id, "fetching latest payload");
        self.get_json(&self.workflow_url(&format!("payload/{payload_id}")), &[])
    }
}

impl WorkflowMetadata for OrcabusClient {
    fn workflow_run(&self, portal_run_id: &str) -> Result<WorkflowRun, ServiceError> {
        Ok(self.find_workflow_run(portal_run_id)?)
    }

    fn latest_payload(&self, portal_run_id: &str) -> Result<Payload, ServiceError> {
        Ok(self.find_latest_payload(portal_run_id)?)
    }
}
