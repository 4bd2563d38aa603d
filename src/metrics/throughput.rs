use std::sync::atomic::{AtomicU64, Ordering};

/// Byte counters shared by every connection of a run.
///
/// Increments are plain relaxed `fetch_add`s so any number of connections can
/// report concurrently; snapshots may lag behind in-flight I/O.
#[derive(Debug, Default)]
pub struct ThroughputMeter {
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThroughputSnapshot {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl ThroughputMeter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&self, bytes: usize) {
        if bytes > 0 {
            self.bytes_read.fetch_add(to_u64(bytes), Ordering::Relaxed);
        }
    }

    pub fn record_write(&self, bytes: usize) {
        if bytes > 0 {
            self.bytes_written.fetch_add(to_u64(bytes), Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ThroughputSnapshot {
        ThroughputSnapshot {
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

fn to_u64(bytes: usize) -> u64 {
    u64::try_from(bytes).unwrap_or(u64::MAX)
}
