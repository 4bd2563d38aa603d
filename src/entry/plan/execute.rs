use tracing::info;

use crate::args::OutputFormat;
use crate::engine::run_benchmark;
use crate::error::AppResult;
use crate::probe::run_probe;
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;
use crate::system::{render_probe_report, render_report};

use super::log_fatal;
use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Probe(args) => {
            let (shutdown_tx, _) = shutdown_channel();
            let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

            let result = run_probe(&args, &shutdown_tx).await;
            drop(shutdown_tx.send(()));
            if let Err(err) = signal_handle.await {
                tracing::debug!("Signal handler ended abnormally: {}", err);
            }

            let stats = result.inspect_err(log_fatal)?;
            println!("{}", render_probe_report(&stats, args.output_format)?);
            Ok(())
        }
        RunPlan::Bench {
            config,
            output_format,
        } => {
            let (shutdown_tx, _) = shutdown_channel();
            let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

            let result = run_benchmark(config, &shutdown_tx).await;
            drop(shutdown_tx.send(()));
            if let Err(err) = signal_handle.await {
                tracing::debug!("Signal handler ended abnormally: {}", err);
            }

            let stats = result.inspect_err(log_fatal)?;
            info!("Run finished after {}s", stats.elapsed_seconds);
            if output_format == OutputFormat::Text {
                println!();
            }
            println!("{}", render_report(&stats, output_format)?);
            Ok(())
        }
    }
}
