use std::time::Duration;

use bytes::Bytes;
use http::{Method, Uri};

use crate::args::{PositiveU64, PositiveUsize};

/// Run-length rule; exactly one applies to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every worker stops once its own request counter reaches the limit.
    ByCount(PositiveU64),
    /// The engine reports once the duration elapses, whatever workers are doing.
    ByDuration(Duration),
}

impl Termination {
    #[must_use]
    pub const fn per_worker_limit(self) -> Option<u64> {
        match self {
            Termination::ByCount(limit) => Some(limit.get()),
            Termination::ByDuration(_) => None,
        }
    }

    #[must_use]
    pub const fn is_duration(self) -> bool {
        matches!(self, Termination::ByDuration(_))
    }
}

/// Everything a run needs, built once before any worker starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub targets: Vec<Uri>,
    pub method: Method,
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    pub keep_alive: bool,
    pub authorization: Option<String>,
    pub extra_headers: Vec<(String, String)>,
    pub concurrency: PositiveUsize,
    pub termination: Termination,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl RunConfig {
    /// Bare GET run against `targets` with the classic 5s timeouts.
    #[must_use]
    pub fn new(targets: Vec<Uri>, concurrency: PositiveUsize, termination: Termination) -> Self {
        Self {
            targets,
            method: Method::GET,
            body: None,
            content_type: None,
            keep_alive: true,
            authorization: None,
            extra_headers: Vec::new(),
            concurrency,
            termination,
            read_timeout: DEFAULT_IO_TIMEOUT,
            write_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}

pub(crate) const DEFAULT_IO_TIMEOUT: Duration = Duration::from_millis(5000);
