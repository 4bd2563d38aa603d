use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_value;
use crate::args::{HttpMethod, OutputFormat};
use crate::error::ValidationError;

/// On-disk configuration; every field is optional and only fills values the
/// command line left at their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub urls_file: Option<String>,
    pub requests: Option<u64>,
    pub duration: Option<DurationValue>,
    pub concurrency: Option<usize>,
    pub keep_alive: Option<bool>,
    pub method: Option<HttpMethod>,
    pub body: Option<String>,
    pub body_file: Option<String>,
    pub content_type: Option<String>,
    pub auth: Option<String>,
    pub headers: Option<Vec<String>>,
    pub read_timeout: Option<DurationValue>,
    pub write_timeout: Option<DurationValue>,
    pub output_format: Option<OutputFormat>,
}

/// Either a bare number of seconds or a string such as `"250ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
