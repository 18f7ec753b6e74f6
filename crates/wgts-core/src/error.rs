use thiserror::Error;

/// Failure reported by an external collaborator (file manager, workflow manager).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{name}}} in template '{template}'")]
    UnknownPlaceholder { name: String, template: String },

    #[error("no value bound for placeholder {{{name}}} in template '{template}'")]
    Unbound { name: String, template: String },

    #[error("unbalanced brace in template '{0}'")]
    Malformed(String),
}

#[derive(Debug, Error)]
#[error("invalid semantic version: '{0}'")]
pub struct VersionParseError(pub String);

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no objects found for portal run id {0}")]
    NotFound(String),

    #[error("missing field in latest payload: {0}")]
    MissingField(String),

    #[error("'{uri}' is not a descendant of output root '{root}'")]
    InvalidPath { uri: String, root: String },

    #[error(transparent)]
    Parse(#[from] VersionParseError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("workflow run {0} has no current state")]
    MissingState(String),

    #[error("payload inputs must be a JSON object")]
    InvalidInputs,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
