//! Request descriptors and the named request set handed to the executor.
pub(crate) mod body;
mod query;
mod set;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::response::Response;

pub use body::{Payload, encode_body};
pub use query::encode_query;
pub use set::RequestSet;

/// Gate run before a request is sent. Returning `false` drops the request
/// from the batch without producing a response.
pub type BeforeHook = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Observer run after a response (or error response) was built.
pub type AfterHook = Arc<dyn Fn(&Request, &Response) + Send + Sync>;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
            Method::Options => Self::OPTIONS,
            Method::Head => Self::HEAD,
        }
    }
}

/// A named HTTP call.
///
/// `path` is either an absolute URL or whatever the transport accepts as a
/// target. The body is either a structured value, encoded at send time, or
/// raw bytes; raw bytes win when both are set.
#[derive(Clone)]
pub struct Request {
    name: String,
    method: Method,
    path: String,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    body: Option<Arc<dyn Payload>>,
    body_bytes: Option<Bytes>,
    before_hook: Option<BeforeHook>,
    after_hook: Option<AfterHook>,
}

impl Request {
    #[must_use]
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            body: None,
            body_bytes: None,
            before_hook: None,
            after_hook: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    pub const fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Path followed by the encoded query string, if any.
    #[must_use]
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        full.push_str(&encode_query(&self.query));
        full
    }

    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn set_headers(&mut self, headers: BTreeMap<String, String>) {
        self.headers = headers;
    }

    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    /// Header value for `key`, matched without regard to ASCII case.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str).or_else(|| {
            self.headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn del_header(&mut self, key: &str) {
        self.headers.remove(key);
    }

    #[must_use]
    pub const fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn set_query(&mut self, query: BTreeMap<String, String>) {
        self.query = query;
    }

    pub fn add_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn del_query(&mut self, key: &str) {
        self.query.remove(key);
    }

    #[must_use]
    pub fn body(&self) -> Option<&dyn Payload> {
        self.body.as_deref()
    }

    pub fn set_body<T>(&mut self, body: T)
    where
        T: Payload + 'static,
    {
        self.body = Some(Arc::new(body));
    }

    pub fn clear_body(&mut self) {
        self.body = None;
        self.body_bytes = None;
    }

    #[must_use]
    pub const fn body_bytes(&self) -> Option<&Bytes> {
        self.body_bytes.as_ref()
    }

    pub fn set_body_bytes(&mut self, body: impl Into<Bytes>) {
        self.body_bytes = Some(body.into());
    }

    #[must_use]
    pub const fn before_hook(&self) -> Option<&BeforeHook> {
        self.before_hook.as_ref()
    }

    pub fn set_before_hook<F>(&mut self, hook: F)
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.before_hook = Some(Arc::new(hook));
    }

    #[must_use]
    pub const fn after_hook(&self) -> Option<&AfterHook> {
        self.after_hook.as_ref()
    }

    pub fn set_after_hook<F>(&mut self, hook: F)
    where
        F: Fn(&Request, &Response) + Send + Sync + 'static,
    {
        self.after_hook = Some(Arc::new(hook));
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .field("body_bytes", &self.body_bytes.as_ref().map(Bytes::len))
            .field("before_hook", &self.before_hook.is_some())
            .field("after_hook", &self.after_hook.is_some())
            .finish()
    }
}
