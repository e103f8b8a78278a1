//! # Client Errors
//!
//! This module defines the error taxonomy shared by the resource client and
//! every capability built on top of it. Keeping it in one place means a feature
//! module can match on the same variants no matter which resource it touched.

use crate::transport::TransportError;

/// Errors surfaced by [`ResourceClient`](crate::ResourceClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The location could not be resolved to a network address. Raised before dispatch.
    #[error("invalid location {location:?}: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// No response was obtained from the BFF.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// A response arrived with a status outside the success range of the operation.
    #[error("unexpected status {status}{}", body_suffix(.body))]
    UnexpectedStatus { status: u16, body: Option<String> },

    /// The response body does not match the expected schema.
    #[error("decode failure: {0}")]
    DecodeFailure(#[source] serde_json::Error),

    /// The submitted record could not be serialized.
    #[error("encode failure: {0}")]
    EncodeFailure(#[source] serde_json::Error),

    /// The caller cancelled the operation before it completed.
    #[error("operation cancelled")]
    Cancelled,
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref().map(|b| format!(": {b}")).unwrap_or_default()
}

impl ClientError {
    pub(crate) fn invalid_location(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Status code of an [`UnexpectedStatus`](Self::UnexpectedStatus) error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
