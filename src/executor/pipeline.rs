use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::request::{Request, encode_body};
use crate::response::Response;
use crate::transport::{Transport, TransportRequest};

use super::timings::RequestTimings;

#[derive(Clone)]
pub(super) struct PipelineContext {
    pub transport: Arc<dyn Transport>,
    pub body_limit: Option<u64>,
}

/// Runs one request through before hook, body encoding, transport call,
/// response construction and after hook. `None` means the before hook
/// vetoed the request.
pub(super) async fn execute_request(
    context: &PipelineContext,
    request: &Request,
) -> (Option<Response>, RequestTimings) {
    let started = Instant::now();
    let mut timings = RequestTimings::default();

    if let Some(hook) = request.before_hook() {
        let proceed = hook(request);
        timings.before_hook = Some(started.elapsed());
        if !proceed {
            debug!("Request '{}' skipped by before hook.", request.name());
            timings.total = started.elapsed();
            return (None, timings);
        }
    }

    let response = send_request(context, request, &mut timings).await;

    if let Some(hook) = request.after_hook() {
        let stage = Instant::now();
        hook(request, &response);
        timings.after_hook = Some(stage.elapsed());
    }

    timings.total = started.elapsed();
    debug!(
        "Request '{}' finished with status {} in {:?}.",
        request.name(),
        response.status_code(),
        timings.total
    );
    (Some(response), timings)
}

async fn send_request(
    context: &PipelineContext,
    request: &Request,
    timings: &mut RequestTimings,
) -> Response {
    let mut stage = Instant::now();
    let body = match encode_body(request) {
        Ok(body) => body,
        Err(err) => {
            warn!("Failed to encode body for request '{}': {}", request.name(), err);
            timings.body = Some(stage.elapsed());
            return Response::from_error(err);
        }
    };
    timings.body = Some(stage.elapsed());

    stage = Instant::now();
    let transport_request = TransportRequest {
        method: request.method(),
        url: request.full_path(),
        headers: request.headers().clone(),
        body,
    };
    let sent = context.transport.send(transport_request).await;
    timings.send = Some(stage.elapsed());
    let transport_response = match sent {
        Ok(transport_response) => transport_response,
        Err(err) => {
            warn!("Request '{}' failed: {}", request.name(), err);
            return Response::from_error(err);
        }
    };

    stage = Instant::now();
    let response = Response::from_transport(transport_response, context.body_limit);
    timings.response = Some(stage.elapsed());
    if let Some(err) = response.errors().first() {
        debug!("Request '{}': {}", request.name(), err);
    }
    response
}
