// Client error types: transport failures, unexpected replies, bad payloads

use crate::api::Endpoint;
use thiserror::Error;

/// Errors raised while talking to the maze server
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("network error on {endpoint}: {message}")]
    Network { endpoint: Endpoint, message: String },
    #[error("{endpoint} answered with HTTP {status}")]
    UnexpectedStatus { endpoint: Endpoint, status: u16 },
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },
}

impl ClientError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ClientError::Network { endpoint, .. }
            | ClientError::UnexpectedStatus { endpoint, .. }
            | ClientError::MalformedResponse { endpoint, .. } => *endpoint,
        }
    }

    pub fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        ClientError::MalformedResponse {
            endpoint,
            reason: reason.into(),
        }
    }
}
