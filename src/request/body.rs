use bytes::Bytes;
use serde::Serialize;

use crate::error::EncodingError;

use super::Request;

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const XML_CONTENT_TYPE: &str = "application/xml";

/// A structured request body that can be rendered as JSON or XML.
///
/// Implemented for every `Serialize + Send + Sync` type.
pub trait Payload: Send + Sync {
    /// Encodes the value as JSON.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError::Json` when serialization fails.
    fn to_json(&self) -> Result<Vec<u8>, EncodingError>;

    /// Encodes the value as XML, using the type name as the root element.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError::Xml` when the value has no XML representation
    /// (bare maps or sequences without a root element, for instance).
    fn to_xml(&self) -> Result<Vec<u8>, EncodingError>;
}

impl<T> Payload for T
where
    T: Serialize + Send + Sync,
{
    fn to_json(&self) -> Result<Vec<u8>, EncodingError> {
        serde_json::to_vec(self).map_err(|source| EncodingError::Json { source })
    }

    fn to_xml(&self) -> Result<Vec<u8>, EncodingError> {
        quick_xml::se::to_string(self)
            .map(String::into_bytes)
            .map_err(|source| EncodingError::Xml { source })
    }
}

/// Builds the bytes sent as the request body.
///
/// Raw bytes are used verbatim. A structured body is encoded as XML when the
/// `Content-Type` header is exactly `application/xml` and as JSON otherwise.
/// A request with neither yields an empty body.
///
/// # Errors
///
/// Returns an `EncodingError` when the structured body cannot be serialized.
pub fn encode_body(request: &Request) -> Result<Bytes, EncodingError> {
    if let Some(raw) = request.body_bytes() {
        return Ok(raw.clone());
    }
    let Some(payload) = request.body() else {
        return Ok(Bytes::new());
    };
    let encoded = if request.header(CONTENT_TYPE) == Some(XML_CONTENT_TYPE) {
        payload.to_xml()?
    } else {
        payload.to_json()?
    };
    Ok(Bytes::from(encoded))
}
