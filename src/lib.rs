//! Core library for the `volley` HTTP load generator.
//!
//! A run is described by a [`domain::RunConfig`], executed by
//! [`engine::run_benchmark`] on a pool of closed-loop workers, and reduced to a
//! single [`metrics::Statistics`] record. Connection-level byte counts come from
//! the metered connector in [`http`]. The `probe` module offers a single-client
//! variant with payload-level accounting.
pub mod args;
pub mod config;
pub mod domain;
pub mod engine;
pub mod entry;
pub mod error;
pub mod http;
pub mod metrics;
pub mod probe;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod system;
