use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use super::Request;

/// Requests keyed by name. Read-only while a batch executes.
#[derive(Debug, Default, Clone)]
pub struct RequestSet {
    requests: BTreeMap<String, Arc<Request>>,
}

impl RequestSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `request` under its name and returns the request it replaced.
    /// The last request added under a name wins.
    pub fn add_request(&mut self, request: Request) -> Option<Arc<Request>> {
        if request.name().is_empty() {
            warn!("Adding request with an empty name.");
        }
        let replaced = self
            .requests
            .insert(request.name().to_owned(), Arc::new(request));
        if let Some(previous) = replaced.as_ref() {
            warn!("Request '{}' replaced an earlier request.", previous.name());
        }
        replaced
    }

    #[must_use]
    pub fn get_request(&self, name: &str) -> Option<&Request> {
        self.requests.get(name).map(Arc::as_ref)
    }

    pub fn del_request(&mut self, name: &str) -> Option<Arc<Request>> {
        self.requests.remove(name)
    }

    /// Request names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.requests.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn shared(&self) -> impl Iterator<Item = &Arc<Request>> {
        self.requests.values()
    }
}

impl FromIterator<Request> for RequestSet {
    fn from_iter<I: IntoIterator<Item = Request>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Request> for RequestSet {
    fn extend<I: IntoIterator<Item = Request>>(&mut self, iter: I) {
        for request in iter {
            drop(self.add_request(request));
        }
    }
}
