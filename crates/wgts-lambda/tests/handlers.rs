use std::sync::Arc;

use serde_json::{Value, json};
use wgts_core::error::{ResolveError, ServiceError};
use wgts_core::models::object::StoredObject;
use wgts_core::models::workflow::{Payload, WorkflowRun};
use wgts_core::services::{ObjectListing, WorkflowMetadata};
use wgts_lambda::error::HandlerError;
use wgts_lambda::handlers::{merge, outputs, samplesheet};

struct FakeOrcabus {
    run: Value,
    payload: Value,
}

impl ObjectListing for FakeOrcabus {
    fn list_objects(&self, portal_run_id: &str) -> Result<Vec<StoredObject>, ServiceError> {
        Ok(vec![
            StoredObject::new("b", format!("{portal_run_id}/cache/tmp")),
            StoredObject::new("b", format!("{portal_run_id}/out/rna/file.bam")),
        ])
    }
}

impl WorkflowMetadata for FakeOrcabus {
    fn workflow_run(&self, _portal_run_id: &str) -> Result<WorkflowRun, ServiceError> {
        serde_json::from_value(self.run.clone()).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn latest_payload(&self, _portal_run_id: &str) -> Result<Payload, ServiceError> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

fn fake() -> Arc<FakeOrcabus> {
    Arc::new(FakeOrcabus {
        run: json!({
            "orcabusId": "wfr.01",
            "portalRunId": "run123",
            "workflow": { "workflowName": "oncoanalyser-wgts-rna", "workflowVersion": "2.1.0" },
            "currentState": { "status": "SUCCEEDED" }
        }),
        payload: json!({
            "data": { "outputs": { "rnaOncoanalyserAnalysisRelPath": "out/rna" } }
        }),
    })
}

#[tokio::test]
async fn outputs_handler_resolves_rna() {
    let event = json!({
        "portalRunId": "run123",
        "phenotype": "TUMOR",
        "sampleType": "RNA",
        "tumorRnaLibraryId": "L001"
    });

    let out = outputs::get_outputs(fake(), event).await.unwrap();
    assert_eq!(
        out,
        json!({
            "tumorRnaInputs": {
                "bam": "s3://b/run123/out/rna/alignments/rna/L001.md.bam",
                "isofoxDir": "s3://b/run123/out/rna/isofox/"
            }
        })
    );
}

#[tokio::test]
async fn outputs_handler_rejects_bad_events() {
    let err = outputs::get_outputs(fake(), json!({ "portalRunId": "run123" }))
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::Event(_)), "{err}");

    let err = outputs::get_outputs(
        fake(),
        json!({ "portalRunId": "run123", "phenotype": "NORMAL", "sampleType": "RNA" }),
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, HandlerError::Resolve(ResolveError::InvalidRequest(_))),
        "{err}"
    );
}

#[test]
fn samplesheet_handler_converts_event() {
    let event = json!({
        "inputs": {
            "groupId": "G",
            "subjectId": "S",
            "tumorRnaSampleId": "PRJ3",
            "tumorRnaInputs": { "bam": "s3://b/L3.md.bam" },
            "refDataHmfDataPath": "s3://ref/"
        }
    });
    let out = samplesheet::convert_ready_event(event).unwrap();
    let rows = out["inputs"]["samplesheet"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["filetype"], "bai");
    assert_eq!(out["inputs"]["genome"], "GRCh38_hmf");
}

#[test]
fn samplesheet_handler_reports_missing_fields() {
    let err = samplesheet::convert_ready_event(json!({ "inputs": {} })).unwrap_err();
    assert!(matches!(err, HandlerError::Convert(_)), "{err}");
}

#[tokio::test]
async fn merge_handler_builds_update() {
    let event = json!({
        "portalRunId": "run123",
        "payload": { "version": "2024.07.01", "data": {} },
        "upstreamData": { "tumorRnaInputs": { "bam": "s3://b/L3.md.bam" } }
    });

    let out = merge::generate_wru_event(fake(), event).await.unwrap();
    let update = &out["workflowRunUpdate"];
    assert_eq!(update["status"], "SUCCEEDED");
    assert_eq!(update["orcabusId"], "wfr.01");
    assert_eq!(
        update["payload"]["data"]["inputs"],
        json!({ "tumorRnaInputs": { "bam": "s3://b/L3.md.bam" } })
    );
}
