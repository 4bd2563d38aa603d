use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{Request, Uri};
use http_body_util::{BodyExt, Full};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::timeout;
use tracing::debug;

use crate::metrics::{AttemptOutcome, WorkerResult};
use crate::shutdown::ShutdownReceiver;

use super::client::BenchClient;
use super::request::RequestTemplate;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AttemptTimeouts {
    pub(crate) read: Duration,
    pub(crate) write: Duration,
}

impl AttemptTimeouts {
    /// Budget for sending the request and receiving the response head.
    const fn exchange(self) -> Duration {
        self.write.saturating_add(self.read)
    }
}

/// Read-only state shared by every worker of a run.
pub(crate) struct WorkerContext {
    pub(crate) client: BenchClient,
    pub(crate) template: RequestTemplate,
    pub(crate) targets: Vec<Uri>,
    pub(crate) limit: Option<u64>,
    pub(crate) timeouts: AttemptTimeouts,
}

impl WorkerContext {
    fn limit_reached(&self, result: &WorkerResult) -> bool {
        self.limit.is_some_and(|limit| result.requests() >= limit)
    }
}

/// Closed request loop of one worker.
///
/// Cycles through the targets until the per-worker limit is reached or a
/// shutdown has been broadcast. Both are checked between attempts only; an
/// attempt that has started always runs to completion and is recorded.
pub(crate) async fn run_worker(
    context: Arc<WorkerContext>,
    result: Arc<WorkerResult>,
    mut shutdown_rx: ShutdownReceiver,
) {
    if context.targets.is_empty() {
        return;
    }
    loop {
        for target in &context.targets {
            if context.limit_reached(&result) || stop_requested(&mut shutdown_rx) {
                return;
            }
            let request = context.template.build(target);
            let outcome = execute_attempt(&context.client, request, context.timeouts).await;
            result.record(outcome);
        }
    }
}

fn stop_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Err(TryRecvError::Empty) => false,
        Ok(()) | Err(TryRecvError::Closed) | Err(TryRecvError::Lagged(_)) => true,
    }
}

pub(crate) async fn execute_attempt(
    client: &BenchClient,
    request: Request<Full<Bytes>>,
    timeouts: AttemptTimeouts,
) -> AttemptOutcome {
    let response = match timeout(timeouts.exchange(), client.request(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            debug!("Request failed: {}", err);
            return AttemptOutcome::NetworkFailed;
        }
        Err(_elapsed) => {
            debug!("Request timed out after {:?}", timeouts.exchange());
            return AttemptOutcome::NetworkFailed;
        }
    };

    let status = response.status().as_u16();
    let body_intact = match timeout(timeouts.read, response.into_body().collect()).await {
        Ok(Ok(_collected)) => true,
        Ok(Err(err)) => {
            debug!("Failed to read response body: {}", err);
            false
        }
        Err(_elapsed) => {
            debug!("Response body read timed out after {:?}", timeouts.read);
            false
        }
    };

    AttemptOutcome::Response {
        status,
        body_intact,
    }
}
