//! Validated, immutable run description shared by the engine and workers.
mod run;

pub use run::{RunConfig, Termination};
