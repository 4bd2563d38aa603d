use std::sync::Arc;

use crate::args::{OutputFormat, ProbeArgs};
use crate::domain::RunConfig;

pub(in crate::entry) enum RunPlan {
    Probe(ProbeArgs),
    Bench {
        config: Arc<RunConfig>,
        output_format: OutputFormat,
    },
}
