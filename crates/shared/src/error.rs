use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A response body that carried `success: false`.
///
/// The server may attach a human readable `message`; it is kept verbatim so
/// it can be logged at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[error("{}", .message.as_deref().unwrap_or("server reported failure without a message"))]
pub struct ApiRejection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiRejection {
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }
}
