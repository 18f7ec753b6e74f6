//! Workflow run update with merged upstream inputs.
//!
//! Takes a draft oncoanalyser payload and the result sets resolved upstream,
//! and produces a workflow run update for the workflow manager. Inputs
//! already present in the draft are never overwritten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::catalog::{NormalDnaOutput, OutputKind, TumorDnaOutput, TumorRnaOutput};
use crate::error::MergeError;
use crate::models::workflow::{Workflow, WorkflowRun};
use crate::outputs::OutputSet;
use crate::services::WorkflowMetadata;

const INPUTS: &str = "inputs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub library_id: String,
    pub orcabus_id: String,
    #[serde(default)]
    pub readsets: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPayload {
    pub version: String,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamData {
    #[serde(default)]
    pub tumor_dna_inputs: Option<OutputSet<TumorDnaOutput>>,
    #[serde(default)]
    pub normal_dna_inputs: Option<OutputSet<NormalDnaOutput>>,
    #[serde(default)]
    pub tumor_rna_inputs: Option<OutputSet<TumorRnaOutput>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeEvent {
    pub portal_run_id: String,
    #[serde(default)]
    pub libraries: Option<Vec<Library>>,
    pub payload: DraftPayload,
    #[serde(default)]
    pub upstream_data: UpstreamData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRunUpdate {
    pub orcabus_id: String,
    pub portal_run_id: String,
    pub workflow: Workflow,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libraries: Option<Vec<Library>>,
    pub payload: DraftPayload,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutput {
    pub workflow_run_update: WorkflowRunUpdate,
}

fn has_group(inputs: Option<&Map<String, Value>>, group: &str) -> bool {
    inputs
        .and_then(|inputs| inputs.get(group))
        .is_some_and(|value| !value.is_null())
}

fn insert_group<K: OutputKind>(
    inputs: &mut Map<String, Value>,
    set: Option<&OutputSet<K>>,
) -> Result<(), MergeError> {
    if let Some(set) = set {
        inputs.insert(K::GROUP.to_string(), serde_json::to_value(set)?);
    }
    Ok(())
}

/// Fill the payload's missing input groups from `upstream`.
///
/// DNA groups are filled only when neither is present; the RNA group only
/// when absent. A payload that already has DNA and RNA inputs is returned as is.
pub fn merge_payload(
    mut payload: DraftPayload,
    upstream: &UpstreamData,
) -> Result<DraftPayload, MergeError> {
    let existing = match payload.data.get(INPUTS) {
        None | Some(Value::Null) => None,
        Some(Value::Object(inputs)) => Some(inputs),
        Some(_) => return Err(MergeError::InvalidInputs),
    };
    let has_dna = has_group(existing, TumorDnaOutput::GROUP)
        || has_group(existing, NormalDnaOutput::GROUP);
    let has_rna = has_group(existing, TumorRnaOutput::GROUP);

    if has_dna && has_rna {
        debug!("payload already carries DNA and RNA inputs, leaving as is");
        return Ok(payload);
    }

    let slot = payload
        .data
        .entry(INPUTS)
        .and_modify(|value| {
            if value.is_null() {
                *value = Value::Object(Map::new());
            }
        })
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(inputs) = slot else {
        return Err(MergeError::InvalidInputs);
    };

    if !has_dna {
        insert_group(inputs, upstream.tumor_dna_inputs.as_ref())?;
        insert_group(inputs, upstream.normal_dna_inputs.as_ref())?;
    }
    if !has_rna {
        insert_group(inputs, upstream.tumor_rna_inputs.as_ref())?;
    }

    Ok(payload)
}

/// Turn a fetched workflow run into an update record.
pub fn build_update(
    run: WorkflowRun,
    libraries: Option<Vec<Library>>,
    payload: DraftPayload,
) -> Result<WorkflowRunUpdate, MergeError> {
    let WorkflowRun {
        orcabus_id,
        portal_run_id,
        workflow,
        current_state,
        mut extra,
    } = run;
    let status = current_state
        .map(|state| state.status)
        .ok_or_else(|| MergeError::MissingState(portal_run_id.clone()))?;

    if libraries.is_some() {
        extra.remove("libraries");
    }

    Ok(WorkflowRunUpdate {
        orcabus_id,
        portal_run_id,
        workflow,
        status,
        libraries,
        payload,
        extra,
    })
}

pub fn merge(
    metadata: &dyn WorkflowMetadata,
    event: MergeEvent,
) -> Result<MergeOutput, MergeError> {
    let run = metadata.workflow_run(&event.portal_run_id)?;
    let payload = merge_payload(event.payload, &event.upstream_data)?;
    let update = build_update(run, event.libraries, payload)?;

    info!(
        portal_run_id = %update.portal_run_id,
        status = %update.status,
        "built workflow run update"
    );

    Ok(MergeOutput {
        workflow_run_update: update,
    })
}
