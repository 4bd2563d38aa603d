use std::time::Duration;

use serde::Serialize;

use super::{OutcomeCounts, ThroughputSnapshot};

/// Final report of a run. Rates are integer per-second values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub requests: u64,
    pub success: u64,
    pub network_failed: u64,
    pub bad_status: u64,
    pub io_failed: u64,
    pub elapsed_seconds: u64,
    pub success_rate_per_second: u64,
    pub read_throughput_bytes_per_second: u64,
    pub write_throughput_bytes_per_second: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl Statistics {
    /// Reduces the summed counters and a meter snapshot into the report.
    ///
    /// Elapsed time is floored to whole seconds with a minimum of one.
    #[must_use]
    pub fn aggregate(
        totals: &OutcomeCounts,
        throughput: ThroughputSnapshot,
        elapsed: Duration,
    ) -> Self {
        let elapsed_seconds = elapsed.as_secs().max(1);
        Self {
            requests: totals.requests,
            success: totals.success,
            network_failed: totals.network_failed,
            bad_status: totals.bad_status,
            io_failed: totals.io_failed,
            elapsed_seconds,
            success_rate_per_second: per_second(totals.success, elapsed_seconds),
            read_throughput_bytes_per_second: per_second(throughput.bytes_read, elapsed_seconds),
            write_throughput_bytes_per_second: per_second(
                throughput.bytes_written,
                elapsed_seconds,
            ),
            bytes_read: throughput.bytes_read,
            bytes_written: throughput.bytes_written,
        }
    }
}

fn per_second(total: u64, elapsed_seconds: u64) -> u64 {
    total.checked_div(elapsed_seconds).unwrap_or(total)
}
