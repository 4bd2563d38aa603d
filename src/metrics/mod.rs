//! Outcome accounting, wire throughput metering, and final aggregation.
mod result;
mod stats;
mod throughput;


pub use result::{AttemptOutcome, OutcomeCounts, WorkerResult, collect_totals, is_success_status};
pub use stats::Statistics;
pub use throughput::{ThroughputMeter, ThroughputSnapshot};
