use std::sync::Arc;

use clap::ArgMatches;

use crate::args::{Command, TesterArgs};
use crate::config::{apply_config, build_run_config, load_config};
use crate::error::AppResult;

use super::log_fatal;
use super::types::RunPlan;

pub(crate) fn build_plan(mut args: TesterArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(command) = args.command.take() {
        match command {
            Command::Probe(probe_args) => return Ok(RunPlan::Probe(probe_args)),
        }
    }

    if let Some(config) = load_config(args.config.as_deref()).inspect_err(log_fatal)? {
        apply_config(&mut args, matches, &config).inspect_err(log_fatal)?;
    }

    let config = build_run_config(&args).inspect_err(log_fatal)?;
    Ok(RunPlan::Bench {
        config: Arc::new(config),
        output_format: args.output_format,
    })
}
