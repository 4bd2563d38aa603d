use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Inclusive status range counted as success.
const SUCCESS_STATUS_MIN: u16 = 200;
const SUCCESS_STATUS_MAX: u16 = 226;

#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (SUCCESS_STATUS_MIN..=SUCCESS_STATUS_MAX).contains(&status)
}

/// How a single request attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// No usable response: connect error, timeout, reset, or malformed reply.
    NetworkFailed,
    /// A response arrived. `body_intact` is false when draining the body failed.
    Response { status: u16, body_intact: bool },
}

/// Counters owned by one worker.
///
/// Only the owning worker writes; the engine may read at any time. Atomics
/// keep a read that races with the last increment well-defined.
#[derive(Debug, Default)]
pub struct WorkerResult {
    requests: AtomicU64,
    success: AtomicU64,
    network_failed: AtomicU64,
    bad_status: AtomicU64,
    io_failed: AtomicU64,
}

impl WorkerResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the attempt before classifying it; a concurrent snapshot may
    /// include the attempt in `requests` only, never in a class only.
    pub fn record(&self, outcome: AttemptOutcome) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        match outcome {
            AttemptOutcome::NetworkFailed => bump(&self.network_failed),
            AttemptOutcome::Response {
                status,
                body_intact,
            } => {
                if is_success_status(status) {
                    bump(&self.success);
                } else {
                    bump(&self.bad_status);
                }
                if !body_intact {
                    bump(&self.io_failed);
                }
            }
        }
    }

    #[must_use]
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Loads run in reverse increment order (`io_failed`, classes, then
    /// `requests`), pairing with the release increments in
    /// [`WorkerResult::record`].
    #[must_use]
    pub fn snapshot(&self) -> OutcomeCounts {
        let io_failed = self.io_failed.load(Ordering::Acquire);
        let success = self.success.load(Ordering::Acquire);
        let network_failed = self.network_failed.load(Ordering::Acquire);
        let bad_status = self.bad_status.load(Ordering::Acquire);
        OutcomeCounts {
            requests: self.requests.load(Ordering::Relaxed),
            success,
            network_failed,
            bad_status,
            io_failed,
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Release);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub requests: u64,
    pub success: u64,
    pub network_failed: u64,
    pub bad_status: u64,
    /// Responses whose body could not be read; a subset of success + bad_status.
    pub io_failed: u64,
}

impl OutcomeCounts {
    pub fn add(&mut self, other: &OutcomeCounts) {
        self.requests = self.requests.saturating_add(other.requests);
        self.success = self.success.saturating_add(other.success);
        self.network_failed = self.network_failed.saturating_add(other.network_failed);
        self.bad_status = self.bad_status.saturating_add(other.bad_status);
        self.io_failed = self.io_failed.saturating_add(other.io_failed);
    }

    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.success
            .checked_add(self.network_failed)
            .and_then(|sum| sum.checked_add(self.bad_status))
            == Some(self.requests)
    }

    /// Drops the attempt cut off by a duration deadline.
    ///
    /// Applies only when exactly one network failure was recorded; returns
    /// whether the counts changed.
    pub fn discount_cutoff_failure(&mut self) -> bool {
        if self.network_failed != 1 {
            return false;
        }
        self.network_failed = 0;
        self.requests = self.requests.saturating_sub(1);
        true
    }
}

/// Sums the current counters of every worker.
#[must_use]
pub fn collect_totals(results: &[Arc<WorkerResult>]) -> OutcomeCounts {
    let mut totals = OutcomeCounts::default();
    for result in results {
        totals.add(&result.snapshot());
    }
    totals
}
