use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP protocol error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse or serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Header error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The upstream answered with a non-success status. `body` keeps the raw
    /// text for logs; it is not part of the display string.
    #[error("OpenAI API Error: {}", .status.as_u16())]
    Upstream { status: StatusCode, body: String },

    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Invalid agent type")]
    InvalidAgentType(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to load menu data from {path}: {reason}")]
    MenuData { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Errors caused by the caller's input rather than by this process or the upstream.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAgentType(_) | Self::InvalidRequest(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
