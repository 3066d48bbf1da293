use thiserror::Error;

/// Failure of a single collection read. The `Display` text is what ends up in
/// the alert channel.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid resource path {path}: {reason}")]
    Url { path: String, reason: String },
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },
    #[error("unexpected payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn path(&self) -> &str {
        match self {
            FetchError::Url { path, .. }
            | FetchError::Transport { path, .. }
            | FetchError::Status { path, .. }
            | FetchError::Decode { path, .. } => path,
        }
    }
}
