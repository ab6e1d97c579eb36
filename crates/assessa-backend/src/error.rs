use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a `{message}` body instead of the
    /// expected object.
    #[error("{0}")]
    Rejected(String),

    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("backend returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("unexpected reply from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}
