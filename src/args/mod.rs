//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::{Command, ProbeArgs, TesterArgs};
pub use types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use parsers::parse_header;
