//! Cold-start lookups for the OrcaBus hostname and bearer token.

use aws_config::SdkConfig;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
struct TokenSecret {
    id_token: String,
}

/// Read the OrcaBus hostname from an SSM parameter.
pub async fn load_hostname(config: &SdkConfig, parameter_name: &str) -> Result<String, ApiError> {
    let client = aws_sdk_ssm::Client::new(config);
    let resp = client
        .get_parameter()
        .name(parameter_name)
        .send()
        .await
        .map_err(|e| {
            ApiError::Config(format!(
                "SSM GetParameter {parameter_name}: {}",
                e.into_service_error()
            ))
        })?;

    resp.parameter()
        .and_then(|parameter| parameter.value())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Config(format!("SSM parameter {parameter_name} has no value")))
}

/// Read the bearer token from a Secrets Manager secret.
pub async fn load_token(config: &SdkConfig, secret_id: &str) -> Result<String, ApiError> {
    let client = aws_sdk_secretsmanager::Client::new(config);
    let resp = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(|e| {
            ApiError::Config(format!(
                "Secrets Manager GetSecretValue {secret_id}: {}",
                e.into_service_error()
            ))
        })?;

    let secret = resp
        .secret_string()
        .ok_or_else(|| ApiError::Config(format!("secret {secret_id} has no string value")))?;
    parse_token(secret)
}

/// Token from a secret string: either `{"id_token": "..."}` or the raw token.
pub fn parse_token(secret: &str) -> Result<String, ApiError> {
    let secret = secret.trim();
    let token = if secret.starts_with('{') {
        let parsed: TokenSecret = serde_json::from_str(secret)
            .map_err(|e| ApiError::Config(format!("token secret is not valid JSON: {e}")))?;
        parsed.id_token
    } else {
        secret.to_string()
    };

    if token.is_empty() {
        return Err(ApiError::Config("token secret is empty".to_string()));
    }
    Ok(token)
}
