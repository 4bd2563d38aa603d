use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Serialize;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError, ValidationError};
use crate::http::compose_headers;
use crate::metrics::is_success_status;

use super::request::ProbeRequest;

/// Counters of a probe run. Throughput values are payload byte totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeStatistic {
    pub request_count: u64,
    pub success_count: u64,
    /// Responses outside the success status range.
    pub failure_count: u64,
    /// Attempts that never produced a response.
    pub network_failed_count: u64,
    /// Responses whose body could not be read.
    pub io_failed_count: u64,
    pub read_throughput: u64,
    pub write_throughput: u64,
}

pub struct ProbeClient {
    client: reqwest::Client,
    request: ProbeRequest,
    headers: HeaderMap,
    statistic: ProbeStatistic,
}

impl ProbeClient {
    /// Builds a client whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when a header is invalid or the client cannot be built.
    pub fn new(request: ProbeRequest, timeout: Duration) -> AppResult<Self> {
        let content_type = request
            .body
            .as_ref()
            .and(request.content_type.as_deref());
        let headers = compose_headers(
            request.keep_alive,
            request.authorization.as_deref(),
            content_type,
            &request.headers,
        )
        .map_err(AppError::http)?;

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .tcp_nodelay(true);
        if !request.keep_alive {
            builder = builder.pool_max_idle_per_host(0);
        }
        let client = builder
            .build()
            .map_err(|source| AppError::http(HttpError::BuildClientFailed { source }))?;

        Ok(Self {
            client,
            request,
            headers,
            statistic: ProbeStatistic::default(),
        })
    }

    #[must_use]
    pub const fn statistic(&self) -> ProbeStatistic {
        self.statistic
    }

    /// Sends the request once and records the outcome.
    pub async fn perform_request(&mut self) {
        self.attempt(None).await;
    }

    pub async fn run_for_amount(&mut self, requests: u64) {
        for _ in 0..requests {
            self.attempt(None).await;
        }
    }

    /// Sends requests back to back until `duration` has passed.
    ///
    /// Each attempt is cut at the deadline. A single network failure at the
    /// end of the run is that cut and is removed from the counts.
    ///
    /// # Errors
    ///
    /// Returns an error when `duration` cannot be added to the current instant.
    pub async fn run_for_duration(&mut self, duration: Duration) -> AppResult<()> {
        let deadline = Instant::now()
            .checked_add(duration)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
        while Instant::now() < deadline {
            self.attempt(Some(deadline)).await;
        }
        if self.statistic.network_failed_count == 1 {
            self.statistic.request_count = self.statistic.request_count.saturating_sub(1);
            self.statistic.network_failed_count = 0;
        }
        Ok(())
    }

    async fn attempt(&mut self, deadline: Option<Instant>) {
        let builder = match self.request.body.as_ref() {
            Some(body) => self.client.post(self.request.url.clone()).body(body.clone()),
            None => self.client.get(self.request.url.clone()),
        };
        let request = builder.headers(self.headers.clone());

        // Counted once the request resolves so a dropped attempt leaves no trace.
        let sent = bounded(deadline, request.send()).await;
        let stats = &mut self.statistic;
        stats.request_count = stats.request_count.saturating_add(1);

        let response = match sent {
            Some(Ok(response)) => response,
            Some(Err(err)) => {
                debug!("Probe request failed: {}", err);
                stats.network_failed_count = stats.network_failed_count.saturating_add(1);
                return;
            }
            None => {
                debug!("Probe request cut at deadline");
                stats.network_failed_count = stats.network_failed_count.saturating_add(1);
                return;
            }
        };

        if is_success_status(response.status().as_u16()) {
            stats.success_count = stats.success_count.saturating_add(1);
        } else {
            stats.failure_count = stats.failure_count.saturating_add(1);
        }

        match bounded(deadline, response.bytes()).await {
            Some(Ok(body)) => {
                stats.read_throughput = stats.read_throughput.saturating_add(byte_len(body.len()));
            }
            Some(Err(err)) => {
                debug!("Probe body read failed: {}", err);
                stats.io_failed_count = stats.io_failed_count.saturating_add(1);
            }
            None => {
                debug!("Probe body read cut at deadline");
                stats.io_failed_count = stats.io_failed_count.saturating_add(1);
            }
        }
        let written = self.request.body.as_ref().map_or(0, |body| byte_len(body.len()));
        stats.write_throughput = stats.write_throughput.saturating_add(written);
    }
}

/// Awaits `future`, giving up at `deadline` if one is set.
async fn bounded<F: Future>(deadline: Option<Instant>, future: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}

fn byte_len(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
