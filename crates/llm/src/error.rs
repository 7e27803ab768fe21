use reqwest::StatusCode;
use thiserror::Error;

/// Ways a single Messages API call can fail.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to model API timed out")]
    Timeout,

    #[error("request to model API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("model API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("model API returned an unparseable body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("model API response has no text content")]
    NoText,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}
