use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StabilityError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request to {url} failed with status {status}")]
    Api { url: String, status: StatusCode },

    #[error("Malformed JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StabilityError>;
