//! Workflow manager records.
//!
//! Only the fields this crate reads are typed. Everything else is carried in
//! `extra` so a record can be echoed back (see [`crate::merge`]) without
//! losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    #[serde(default)]
    pub orcabus_id: String,
    pub portal_run_id: String,
    pub workflow: Workflow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<WorkflowRunState>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(alias = "version")]
    pub workflow_version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRunState {
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub data: PayloadData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadData {
    #[serde(default)]
    pub outputs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_parameters: Option<EngineParameters>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PayloadData {
    /// A string-valued entry of `outputs`, if present and non-empty.
    pub fn output_str(&self, field: &str) -> Option<&str> {
        self.outputs
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn output_uri(&self) -> Option<&str> {
        self.engine_parameters
            .as_ref()
            .and_then(|p| p.output_uri.as_deref())
            .filter(|s| !s.is_empty())
    }
}
