use std::env;
use std::time::Duration;

use wgts_orcabus::client::DEFAULT_TIMEOUT;

pub const HOSTNAME_SSM_PARAMETER_NAME: &str = "HOSTNAME_SSM_PARAMETER_NAME";
pub const ORCABUS_TOKEN_SECRET_ID: &str = "ORCABUS_TOKEN_SECRET_ID";
pub const ORCABUS_HTTP_TIMEOUT_SECS: &str = "ORCABUS_HTTP_TIMEOUT_SECS";

const DEFAULT_HOSTNAME_PARAMETER: &str = "/hosted_zone/umccr/name";
const DEFAULT_TOKEN_SECRET: &str = "orcabus/token-service-jwt";

/// Settings read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub hostname_parameter: String,
    pub token_secret_id: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unset, empty or unparseable values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let http_timeout = match var(ORCABUS_HTTP_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {ORCABUS_HTTP_TIMEOUT_SECS}");
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self {
            hostname_parameter: var(HOSTNAME_SSM_PARAMETER_NAME)
                .unwrap_or_else(|| DEFAULT_HOSTNAME_PARAMETER.to_string()),
            token_secret_id: var(ORCABUS_TOKEN_SECRET_ID)
                .unwrap_or_else(|| DEFAULT_TOKEN_SECRET.to_string()),
            http_timeout,
        }
    }
}
