// Error types for the cmt-reviews application.
// Handles CMT API errors, cache errors, and general application errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmtError {
    #[error("CMT API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Login failed: CMT rejected the credentials (HTTP {status})")]
    Authentication { status: u16 },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("No cached paper list for conference {0}; run the fetch step first")]
    MissingPaperList(String),

    #[error("No conference selected; pass a conference id or run the fetch step first")]
    MissingConference,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CmtError>;
