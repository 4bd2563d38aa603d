//! HTTP plumbing for the benchmark: metered connections, the shared client,
//! request templates, and the per-worker request loop.
mod client;
mod connector;
mod request;
mod worker;

#[cfg(test)]
pub(crate) mod test_support;

pub(crate) use client::build_client;
pub use connector::{MeteredConnection, MeteredConnector, MeteredStream};
pub(crate) use request::{RequestTemplate, compose_headers};
pub(crate) use worker::{AttemptTimeouts, WorkerContext, run_worker};
