use std::sync::Arc;

use serde_json::Value;
use wgts_core::merge::{self, MergeEvent};
use wgts_core::services::WorkflowMetadata;

use crate::error::HandlerError;

/// Build a workflow run update carrying the merged upstream inputs.
pub async fn generate_wru_event<C>(client: Arc<C>, event: Value) -> Result<Value, HandlerError>
where
    C: WorkflowMetadata + 'static,
{
    let event: MergeEvent = serde_json::from_value(event)?;
    let output = tokio::task::spawn_blocking(move || merge::merge(client.as_ref(), event)).await??;
    Ok(serde_json::to_value(output)?)
}
