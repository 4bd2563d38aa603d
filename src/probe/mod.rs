//! Single-client probe with payload-level accounting.
//!
//! Unlike the engine, the probe counts body bytes rather than wire bytes and
//! runs one request at a time on a `reqwest` client with a single overall
//! timeout.
mod client;
mod request;


pub use client::{ProbeClient, ProbeStatistic};
pub use request::ProbeRequest;

use tracing::info;

use crate::args::ProbeArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::shutdown::ShutdownSender;

/// Runs the probe described by `args` until its termination is reached or a
/// shutdown is broadcast on `shutdown_tx`.
///
/// An interrupted probe reports the attempts that finished before the
/// shutdown; the attempt in flight is dropped uncounted.
///
/// # Errors
///
/// Returns an error when the arguments are invalid or the client cannot be
/// built.
pub async fn run_probe(
    args: &ProbeArgs,
    shutdown_tx: &ShutdownSender,
) -> AppResult<ProbeStatistic> {
    let request = ProbeRequest::from_args(args)?;
    let mut client = ProbeClient::new(request, args.timeout)?;
    let mut interrupt_rx = shutdown_tx.subscribe();

    let run = async {
        match (args.requests, args.duration) {
            (Some(requests), None) => {
                info!("Probing {} with {} requests", args.url, requests.get());
                client.run_for_amount(requests.get()).await;
                Ok(())
            }
            (None, Some(duration)) => {
                info!("Probing {} for {:?}", args.url, duration);
                client.run_for_duration(duration).await
            }
            (Some(_), Some(_)) => Err(AppError::validation(ValidationError::TerminationConflict)),
            (None, None) => Err(AppError::validation(ValidationError::MissingTermination)),
        }
    };
    tokio::select! {
        outcome = run => outcome?,
        _ = interrupt_rx.recv() => info!("Probe interrupted, reporting current results."),
    }
    Ok(client.statistic())
}
