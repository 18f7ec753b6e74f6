use std::sync::Arc;

use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use wgts_lambda::config::Config;
use wgts_lambda::error::HandlerError;
use wgts_lambda::handlers::outputs;
use wgts_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    wgts_lambda::init_tracing();

    let config = Config::from_env();
    let state = AppState::load(&config).await?;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let client = Arc::clone(&state.client);
        async move {
            outputs::get_outputs(client, event.payload)
                .await
                .map_err(HandlerError::report)
        }
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}
