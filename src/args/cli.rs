use clap::{ArgAction, Args, Parser, Subcommand};
use std::time::Duration;

use super::parsers::{
    parse_bool_flag, parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize,
};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a single client and report payload-level statistics
    Probe(ProbeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ProbeArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: String,

    /// Number of requests to perform
    #[arg(long = "requests", short = 'r', value_parser = parse_positive_u64)]
    pub requests: Option<PositiveU64>,

    /// Keep sending requests for this long (supports ms/s/m/h)
    #[arg(long = "duration", short = 't', value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Request body literal (switches the method to POST)
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Request body from file
    #[arg(long = "body-file", short = 'd')]
    pub body_file: Option<String>,

    /// Content-Type header
    #[arg(long = "content-type")]
    pub content_type: Option<String>,

    /// Authorization header value
    #[arg(long = "auth")]
    pub auth: Option<String>,

    /// Extra headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Send `Connection: keep-alive` and reuse connections
    #[arg(long = "keep-alive", short = 'k', default_value = "true", value_parser = parse_bool_flag, action = ArgAction::Set)]
    pub keep_alive: bool,

    /// Overall timeout per request (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP load generator - closed-loop workers, count or duration runs, lock-free wire throughput metering."
)]
pub struct TesterArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL
    #[arg(long, short)]
    pub url: Option<String>,

    /// Newline-delimited file of target URLs (combined with --url)
    #[arg(long = "urls-file", short = 'f')]
    pub urls_file: Option<String>,

    /// Number of requests per worker
    #[arg(long = "requests", short = 'r', value_parser = parse_positive_u64)]
    pub requests: Option<PositiveU64>,

    /// Duration of the run (supports ms/s/m/h, bare numbers are seconds)
    #[arg(long = "duration", short = 't', value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Number of concurrent workers
    #[arg(long, short = 'c', default_value = "100", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Send `Connection: keep-alive` and reuse connections
    #[arg(long = "keep-alive", short = 'k', default_value = "true", value_parser = parse_bool_flag, action = ArgAction::Set)]
    pub keep_alive: bool,

    /// HTTP method (defaults to GET, or POST when a body is set)
    #[arg(long, short = 'X', ignore_case = true)]
    pub method: Option<HttpMethod>,

    /// Request body literal
    #[arg(long, short = 'b')]
    pub body: Option<String>,

    /// Request body from file
    #[arg(long = "body-file", short = 'd')]
    pub body_file: Option<String>,

    /// Content-Type header
    #[arg(long = "content-type")]
    pub content_type: Option<String>,

    /// Authorization header value (e.g. 'Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==')
    #[arg(long = "auth")]
    pub auth: Option<String>,

    /// Extra headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Read timeout (supports ms/s/m/h)
    #[arg(long = "read-timeout", default_value = "5000ms", value_parser = parse_duration_arg)]
    pub read_timeout: Duration,

    /// Write timeout, also bounds connection setup (supports ms/s/m/h)
    #[arg(long = "write-timeout", default_value = "5000ms", value_parser = parse_duration_arg)]
    pub write_timeout: Duration,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Path to config file (TOML or JSON)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging (overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
