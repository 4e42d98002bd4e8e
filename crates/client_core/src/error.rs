//! Failure taxonomy for room and message fetches.

use shared::error::ApiRejection;
use thiserror::Error;

/// Why a fetch produced no data.
///
/// Every variant is handled the same way by the controller: the pending
/// update is skipped and a diagnostic is logged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request: {0}")]
    Rejected(#[from] ApiRejection),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Rejected(_) => "rejected",
            Self::Malformed(_) => "malformed",
        }
    }
}

#[derive(Debug, Error)]
pub enum BaseUrlError {
    #[error("invalid base url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("base url `{0}` cannot carry path segments")]
    NotHierarchical(String),
}
