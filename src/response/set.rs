use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::CloseError;

use super::Response;

type ResponseMap = BTreeMap<String, Arc<Response>>;

/// Responses keyed by request name.
///
/// Safe to fill from many tasks at once: every operation takes one lock over
/// the whole map, and the lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct ResponseSet {
    responses: Mutex<ResponseMap>,
}

impl ResponseSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ResponseMap> {
        // Entries are whole values; a panic elsewhere cannot leave one torn.
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `response` under `name` and returns the response it replaced.
    pub fn add_response(
        &self,
        name: impl Into<String>,
        response: Response,
    ) -> Option<Arc<Response>> {
        self.lock().insert(name.into(), Arc::new(response))
    }

    #[must_use]
    pub fn get_response(&self, name: &str) -> Option<Arc<Response>> {
        self.lock().get(name).cloned()
    }

    pub fn del_response(&self, name: &str) -> Option<Arc<Response>> {
        self.lock().remove(name)
    }

    /// Response names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Closes every response body and returns the names whose close failed.
    pub async fn close_all(&self) -> BTreeMap<String, CloseError> {
        let snapshot: Vec<(String, Arc<Response>)> = self
            .lock()
            .iter()
            .map(|(name, response)| (name.clone(), Arc::clone(response)))
            .collect();

        let mut failures = BTreeMap::new();
        for (name, response) in snapshot {
            if let Err(err) = response.close().await {
                failures.insert(name, err);
            }
        }
        failures
    }

    /// Consumes the set, returning the underlying map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Arc<Response>> {
        self.responses
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn snapshot(&self) -> Self {
        Self {
            responses: Mutex::new(self.lock().clone()),
        }
    }
}
