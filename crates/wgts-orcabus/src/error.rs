use thiserror::Error;
use wgts_core::error::ServiceError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(what) => ServiceError::NotFound(what),
            ApiError::Status { status: 404, url } => ServiceError::NotFound(url),
            decode @ ApiError::Decode { .. } => ServiceError::Decode(decode.to_string()),
            other => ServiceError::Unavailable(other.to_string()),
        }
    }
}
