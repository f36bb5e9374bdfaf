use thiserror::Error;

use super::TransportError;

/// Failure to serialize a structured request body. The request is never sent.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Failed to encode JSON body: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode XML body: {source}")]
    Xml {
        #[source]
        source: quick_xml::DeError,
    },
}

/// Failure to release a response body.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CloseError {
    #[error("Response has no transport body to close.")]
    NoBody,
}

/// An error recorded on a `Response`. None of these abort a batch.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Invalid status code {status}.")]
    InvalidStatusCode { status: u16 },
}

impl RequestError {
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[must_use]
    pub const fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }

    #[must_use]
    pub const fn is_invalid_status_code(&self) -> bool {
        matches!(self, Self::InvalidStatusCode { .. })
    }
}
