//! In-memory stand-ins for the OrcaBus services.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use wgts_core::error::ServiceError;
use wgts_core::models::object::StoredObject;
use wgts_core::models::workflow::{Payload, WorkflowRun};
use wgts_core::services::{ObjectListing, WorkflowMetadata};

#[derive(Default)]
pub struct FakeListing {
    pub objects: Vec<StoredObject>,
    pub calls: AtomicUsize,
}

impl FakeListing {
    pub fn new(bucket: &str, keys: &[&str]) -> Self {
        Self {
            objects: keys.iter().map(|key| StoredObject::new(bucket, *key)).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ObjectListing for FakeListing {
    fn list_objects(&self, _portal_run_id: &str) -> Result<Vec<StoredObject>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.clone())
    }
}

#[derive(Default)]
pub struct FakeMetadata {
    pub run: Option<WorkflowRun>,
    pub payload: Option<Payload>,
    pub calls: AtomicUsize,
}

impl FakeMetadata {
    pub fn new(run: Value, payload: Value) -> Self {
        Self {
            run: Some(serde_json::from_value(run).unwrap()),
            payload: Some(serde_json::from_value(payload).unwrap()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WorkflowMetadata for FakeMetadata {
    fn workflow_run(&self, portal_run_id: &str) -> Result<WorkflowRun, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.run
            .clone()
            .ok_or_else(|| ServiceError::NotFound(format!("workflow run {portal_run_id}")))
    }

    fn latest_payload(&self, portal_run_id: &str) -> Result<Payload, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payload
            .clone()
            .ok_or_else(|| ServiceError::NotFound(format!("payload for {portal_run_id}")))
    }
}

pub fn workflow_run(portal_run_id: &str, version: &str) -> Value {
    json!({
        "orcabusId": "wfr.01J0000000000000000000000",
        "portalRunId": portal_run_id,
        "workflowRunName": "umccr--automated--oncoanalyser-wgts-dna--2-1-0--run",
        "workflow": {
            "orcabusId": "wfl.01J0000000000000000000000",
            "workflowName": "oncoanalyser-wgts-dna",
            "workflowVersion": version
        },
        "currentState": { "status": "SUCCEEDED", "timestamp": "2025-01-01T00:00:00Z" }
    })
}
