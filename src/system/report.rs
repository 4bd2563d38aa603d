use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::Statistics;
use crate::probe::ProbeStatistic;

/// Fixed-width report lines, one metric per line.
#[must_use]
pub fn report_lines(stats: &Statistics) -> Vec<String> {
    vec![
        format!("Requests:                       {:>10} hits", stats.requests),
        format!("Successful requests:            {:>10} hits", stats.success),
        format!("Network failed:                 {:>10} hits", stats.network_failed),
        format!("Bad requests failed (!2xx):     {:>10} hits", stats.bad_status),
        format!("Body read failed:               {:>10} hits", stats.io_failed),
        format!(
            "Successful requests rate:       {:>10} hits/sec",
            stats.success_rate_per_second
        ),
        format!(
            "Read throughput:                {:>10} bytes/sec",
            stats.read_throughput_bytes_per_second
        ),
        format!(
            "Write throughput:               {:>10} bytes/sec",
            stats.write_throughput_bytes_per_second
        ),
        format!("Test time:                      {:>10} sec", stats.elapsed_seconds),
    ]
}

/// Renders the final run report in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_report(stats: &Statistics, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(report_lines(stats).join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}

#[must_use]
pub fn probe_report_lines(stats: &ProbeStatistic) -> Vec<String> {
    vec![
        format!("Requests:                       {:>10} hits", stats.request_count),
        format!("Successful requests:            {:>10} hits", stats.success_count),
        format!("Network failed:                 {:>10} hits", stats.network_failed_count),
        format!("Bad requests failed (!2xx):     {:>10} hits", stats.failure_count),
        format!("Body read failed:               {:>10} hits", stats.io_failed_count),
        format!("Read payload:                   {:>10} bytes", stats.read_throughput),
        format!("Write payload:                  {:>10} bytes", stats.write_throughput),
    ]
}

/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_probe_report(stats: &ProbeStatistic, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(probe_report_lines(stats).join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}
