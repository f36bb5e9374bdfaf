//! Response descriptors and the concurrently built response set.
mod body;
mod set;


use std::fmt;

use bytes::{Bytes, BytesMut};
use futures_util::{StreamExt, stream};
use http::HeaderMap;
use tokio::sync::Mutex;

use crate::error::{CloseError, RequestError, TransportError};
use crate::transport::{BodyStream, TransportResponse};

pub use body::cap_body;
pub use set::ResponseSet;

enum BodyState {
    /// Error response: the transport never produced a body.
    Absent,
    Open(BodyStream),
    Buffered(Bytes),
    Taken,
    Closed,
}

/// Outcome of one request.
///
/// Always check `errors()` first: an error response carries no status,
/// headers or body, and a non-2xx response carries an `InvalidStatusCode`
/// error next to its populated status, headers and body.
pub struct Response {
    errors: Vec<RequestError>,
    status: String,
    status_code: u16,
    headers: HeaderMap,
    body: Mutex<BodyState>,
}

impl Response {
    /// A response for a request that never reached a transport reply.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Into<RequestError>,
    {
        Self {
            errors: vec![error.into()],
            status: String::new(),
            status_code: 0,
            headers: HeaderMap::new(),
            body: Mutex::new(BodyState::Absent),
        }
    }

    /// Wraps a transport reply. Status codes outside `[200, 300)` record one
    /// `InvalidStatusCode` error. The status line uses the server's reason
    /// phrase when the transport reports one, the canonical phrase otherwise. With `body_limit` set, the body stream
    /// silently ends after that many bytes.
    #[must_use]
    pub fn from_transport(response: TransportResponse, body_limit: Option<u64>) -> Self {
        let status_code = response.status.as_u16();
        let mut errors = Vec::new();
        if !response.status.is_success() {
            errors.push(RequestError::InvalidStatusCode {
                status: status_code,
            });
        }
        let reason = response
            .reason
            .as_deref()
            .or_else(|| response.status.canonical_reason());
        let status = match reason {
            Some(reason) => format!("{} {}", status_code, reason),
            None => status_code.to_string(),
        };
        let body = match body_limit {
            Some(limit) => cap_body(response.body, limit),
            None => response.body,
        };
        Self {
            errors,
            status,
            status_code,
            headers: response.headers,
            body: Mutex::new(BodyState::Open(body)),
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[RequestError] {
        &self.errors
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Status line such as `"200 OK"`; empty for error responses.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Status code; `0` for error responses.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    /// Reads the whole (capped) body and keeps it, so later calls return the
    /// same bytes. Error responses, and bodies already taken or closed, read
    /// as empty.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Transport` when the stream fails mid-read; the
    /// body is closed afterwards.
    pub async fn body(&self) -> Result<Bytes, RequestError> {
        let mut state = self.body.lock().await;
        match std::mem::replace(&mut *state, BodyState::Taken) {
            BodyState::Open(mut stream) => {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    match chunk {
                        Ok(bytes) => buffer.extend_from_slice(&bytes),
                        Err(err) => {
                            *state = BodyState::Closed;
                            return Err(err.into());
                        }
                    }
                }
                let bytes = buffer.freeze();
                *state = BodyState::Buffered(bytes.clone());
                Ok(bytes)
            }
            BodyState::Buffered(bytes) => {
                *state = BodyState::Buffered(bytes.clone());
                Ok(bytes)
            }
            BodyState::Absent => {
                *state = BodyState::Absent;
                Ok(Bytes::new())
            }
            BodyState::Closed => {
                *state = BodyState::Closed;
                Ok(Bytes::new())
            }
            BodyState::Taken => Ok(Bytes::new()),
        }
    }

    /// Hands the (capped) body stream to the caller. Only the first call gets
    /// the data; later calls yield an empty stream.
    pub async fn take_body_stream(&self) -> BodyStream {
        let mut state = self.body.lock().await;
        match std::mem::replace(&mut *state, BodyState::Taken) {
            BodyState::Open(stream) => stream,
            BodyState::Buffered(bytes) => {
                stream::once(async move { Ok::<Bytes, TransportError>(bytes) }).boxed()
            }
            BodyState::Absent => {
                *state = BodyState::Absent;
                stream::empty().boxed()
            }
            BodyState::Closed => {
                *state = BodyState::Closed;
                stream::empty().boxed()
            }
            BodyState::Taken => stream::empty().boxed(),
        }
    }

    /// Releases the body. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CloseError::NoBody` for error responses, which never held a
    /// transport body.
    pub async fn close(&self) -> Result<(), CloseError> {
        let mut state = self.body.lock().await;
        if matches!(*state, BodyState::Absent) {
            return Err(CloseError::NoBody);
        }
        *state = BodyState::Closed;
        Ok(())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("errors", &self.errors)
            .field("status", &self.status)
            .field("status_code", &self.status_code)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
