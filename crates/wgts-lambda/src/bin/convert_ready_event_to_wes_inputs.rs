use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use wgts_lambda::error::HandlerError;
use wgts_lambda::handlers::samplesheet;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    wgts_lambda::init_tracing();

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| async move {
        samplesheet::convert_ready_event(event.payload).map_err(HandlerError::report)
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}
