//! Fan-out/fan-in execution of a request set.
mod pipeline;
mod timings;


use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::config::ExecutorConfig;
use crate::error::AppResult;
use crate::request::RequestSet;
use crate::response::ResponseSet;
use crate::transport::{ReqwestTransport, Transport};

use pipeline::{PipelineContext, execute_request};
pub use timings::{BatchTimings, RequestTimings};

/// Executes every request of a `RequestSet` concurrently and collects the
/// responses by request name.
#[derive(Clone)]
pub struct Executor {
    config: ExecutorConfig,
    transport: Arc<dyn Transport>,
    limiter: Option<Arc<Semaphore>>,
}

impl Executor {
    /// Creates an executor over a reqwest transport built from
    /// `config.transport`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: ExecutorConfig) -> AppResult<Self> {
        let transport = ReqwestTransport::new(&config.transport)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn with_transport(config: ExecutorConfig, transport: Arc<dyn Transport>) -> Self {
        let limiter = config
            .max_in_flight
            .map(|permits| Arc::new(Semaphore::new(permits.get())));
        Self {
            config,
            transport,
            limiter,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    #[must_use]
    pub const fn max_body_size(&self) -> i64 {
        self.config.max_body_size
    }

    /// Sends every request and waits for all of them. Requests vetoed by
    /// their before hook have no entry; every other request has exactly one,
    /// with failures recorded in `Response::errors`.
    pub async fn exec(&self, requests: &RequestSet) -> ResponseSet {
        self.run_batch(requests).await.0
    }

    /// Like `exec`, also returning how long the batch and each pipeline
    /// stage of each request took.
    pub async fn exec_with_timings(&self, requests: &RequestSet) -> (ResponseSet, BatchTimings) {
        self.run_batch(requests).await
    }

    async fn run_batch(&self, requests: &RequestSet) -> (ResponseSet, BatchTimings) {
        let started = Instant::now();
        let responses = Arc::new(ResponseSet::new());
        let context = PipelineContext {
            transport: Arc::clone(&self.transport),
            body_limit: self.config.body_limit(),
        };

        let mut tasks = JoinSet::new();
        for request in requests.shared() {
            let request = Arc::clone(request);
            let context = context.clone();
            let limiter = self.limiter.clone();
            let responses = Arc::clone(&responses);

            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                let (response, request_timings) = execute_request(&context, &request).await;
                if let Some(response) = response {
                    drop(responses.add_response(request.name(), response));
                }
                (request.name().to_owned(), request_timings)
            });
        }

        let mut per_request = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, request_timings)) => {
                    per_request.insert(name, request_timings);
                }
                Err(err) => error!("Request task failed: {}", err),
            }
        }

        let batch = BatchTimings {
            total: started.elapsed(),
            requests: per_request,
        };
        debug!(
            "Batch of {} requests finished in {:?}.",
            requests.len(),
            batch.total
        );

        let responses =
            Arc::try_unwrap(responses).unwrap_or_else(|shared| shared.snapshot());
        (responses, batch)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
