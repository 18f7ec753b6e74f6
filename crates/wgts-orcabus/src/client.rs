use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for the OrcaBus REST services.
///
/// Each call performs its requests synchronously. Async callers move calls
/// onto a blocking thread.
#[derive(Clone)]
pub struct OrcabusClient {
    agent: Agent,
    token: String,
    file_base: String,
    workflow_base: String,
}

impl fmt::Debug for OrcabusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrcabusClient")
            .field("file_base", &self.file_base)
            .field("workflow_base", &self.workflow_base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl OrcabusClient {
    /// Client for the services under `hostname`, e.g. `file.<hostname>`.
    pub fn new(hostname: &str, token: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_urls(
            format!("https://file.{hostname}"),
            format!("https://workflow.{hostname}"),
            token,
            timeout,
        )
    }

    /// Client with explicit service roots (no trailing `/`).
    pub fn with_base_urls(
        file_base: impl Into<String>,
        workflow_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            token: token.into(),
            file_base: file_base.into().trim_end_matches('/').to_string(),
            workflow_base: workflow_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn file_url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.file_base)
    }

    pub(crate) fn workflow_url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.workflow_base)
    }

    /// GET `url` with bearer auth and decode the JSON body.
    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self
            .agent
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json");
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let mut response = request.call().map_err(|e| ApiError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "orcabus response");
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
