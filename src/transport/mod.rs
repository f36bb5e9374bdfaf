//! The HTTP transport boundary consumed by the executor.
mod client;

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use http::{HeaderMap, StatusCode};

use crate::error::TransportError;
use crate::request::Method;

pub use client::{DEFAULT_USER_AGENT, ReqwestTransport};

/// Response body as a stream of chunks. Dropping it releases the connection.
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Everything a transport needs to issue one HTTP call.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    /// Set verbatim; name case is left to the transport.
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Reason phrase sent by the server, when it differs from the
    /// canonical one for `status`.
    pub reason: Option<String>,
    pub body: BodyStream,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the status, headers and body stream.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no response was received: malformed
    /// URL or headers, connection failures, protocol errors.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
