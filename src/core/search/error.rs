//! Search Error Types
//!
//! Error handling for the backend calls made by the search subsystem.
//! None of these reach the user: each component collapses them into
//! "show less" at its own boundary.

use thiserror::Error;

/// Backend call errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status} for {path}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid backend base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
