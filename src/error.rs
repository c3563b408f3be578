//! Error type shared by argument handling and event sources.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "http")]
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("malformed event data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgs(String),

    #[error("unsupported event source: {0}")]
    UnsupportedSource(String),
}

pub type Result<T> = std::result::Result<T, Error>;
