use std::sync::Arc;

use serde_json::Value;
use wgts_core::models::request::OutputsRequest;
use wgts_core::resolve;
use wgts_core::services::{ObjectListing, WorkflowMetadata};

use crate::error::HandlerError;

/// Resolve the outputs of a finished oncoanalyser-wgts run.
///
/// Returns `{"<group>": {...}}` with a single result set.
pub async fn get_outputs<C>(client: Arc<C>, event: Value) -> Result<Value, HandlerError>
where
    C: ObjectListing + WorkflowMetadata + 'static,
{
    let request: OutputsRequest = serde_json::from_value(event)?;
    tracing::info!(
        portal_run_id = %request.portal_run_id,
        phenotype = %request.phenotype,
        sample_type = %request.sample_type,
        "resolving oncoanalyser outputs"
    );

    let inputs = tokio::task::spawn_blocking(move || {
        resolve::get_inputs(client.as_ref(), client.as_ref(), &request)
    })
    .await??;

    Ok(serde_json::to_value(inputs)?)
}
