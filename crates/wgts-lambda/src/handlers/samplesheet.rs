use serde_json::Value;
use wgts_core::samplesheet;

use crate::error::HandlerError;

/// Ready-event inputs to WES launch inputs. No network access.
pub fn convert_ready_event(event: Value) -> Result<Value, HandlerError> {
    let wes = samplesheet::convert_event(event)?;
    tracing::info!(rows = wes.inputs.samplesheet.len(), "converted ready event");
    Ok(serde_json::to_value(wes)?)
}
