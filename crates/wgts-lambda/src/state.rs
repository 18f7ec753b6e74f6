use std::sync::Arc;

use aws_config::BehaviorVersion;
use wgts_orcabus::OrcabusClient;
use wgts_orcabus::error::ApiError;
use wgts_orcabus::secrets;

use crate::config::Config;

/// Shared across invocations of a warm Lambda.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<OrcabusClient>,
}

impl AppState {
    /// Resolve the OrcaBus hostname and token, then build the HTTP client.
    pub async fn load(config: &Config) -> Result<Self, ApiError> {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let hostname = secrets::load_hostname(&sdk_config, &config.hostname_parameter).await?;
        let token = secrets::load_token(&sdk_config, &config.token_secret_id).await?;

        tracing::info!(hostname = %hostname, "orcabus client ready");
        Ok(Self {
            client: Arc::new(OrcabusClient::new(&hostname, token, config.http_timeout)),
        })
    }
}
