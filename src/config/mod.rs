//! Configuration loading, merging with CLI arguments, and validation into a
//! [`RunConfig`](crate::domain::RunConfig).
mod apply;
mod build;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::apply_config;
pub use build::build_run_config;
pub use loader::load_config;

pub(crate) use build::{parse_target_url, read_body};
#[cfg(test)]
pub(crate) use loader::load_config_file;
