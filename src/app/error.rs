use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    BadStatus { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed controller has shut down")]
    ControllerClosed,

    #[error("{0}")]
    Other(String),
}

impl ReelError {
    /// True for the failures a recommendations request can end in:
    /// transport, non-2xx status, or an undecodable body.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            ReelError::Transport(_) | ReelError::BadStatus { .. } | ReelError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReelError>;
