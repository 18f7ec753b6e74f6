use thiserror::Error;
use wgts_core::error::{ConvertError, MergeError, ResolveError};

/// Everything a handler invocation can fail with.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid event: {0}")]
    Event(#[from] serde_json::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("handler task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl HandlerError {
    /// Log once and hand the error to the runtime as the invocation error.
    pub fn report(self) -> lambda_runtime::Error {
        tracing::error!(error = %self, "invocation failed");
        Box::new(self)
    }
}
