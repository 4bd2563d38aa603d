//! Worker-pool dispatch, termination policy, and the single final aggregation.
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::domain::{RunConfig, Termination};
use crate::error::{AppError, AppResult};
use crate::http::{AttemptTimeouts, RequestTemplate, WorkerContext, build_client, run_worker};
use crate::metrics::{Statistics, ThroughputMeter, WorkerResult, collect_totals};
use crate::shutdown::{ShutdownReceiver, ShutdownSender};


/// What ended the observation of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cutoff {
    /// Every worker reached its own request limit.
    Completed,
    /// The run duration elapsed.
    Deadline,
    /// A shutdown was broadcast (Ctrl+C, SIGTERM, or a caller).
    Interrupted,
}

/// Runs one benchmark and returns its statistics.
///
/// Workers are spawned on the current tokio runtime and share one client and
/// one [`ThroughputMeter`]. Count-based runs wait for every worker; duration
/// runs report as soon as the deadline passes. A shutdown broadcast on
/// `shutdown_tx` ends either kind early. Aggregation happens exactly once,
/// after which a shutdown is broadcast so remaining workers stop at their next
/// loop check.
///
/// # Errors
///
/// Returns an error when the request headers are invalid or a worker task
/// panicked.
pub async fn run_benchmark(
    config: Arc<RunConfig>,
    shutdown_tx: &ShutdownSender,
) -> AppResult<Statistics> {
    let template = RequestTemplate::from_config(&config).map_err(AppError::http)?;
    let meter = Arc::new(ThroughputMeter::new());
    let context = Arc::new(WorkerContext {
        client: build_client(&config, Arc::clone(&meter)),
        template,
        targets: config.targets.clone(),
        limit: config.termination.per_worker_limit(),
        timeouts: AttemptTimeouts {
            read: config.read_timeout,
            write: config.write_timeout,
        },
    });

    let mut interrupt_rx = shutdown_tx.subscribe();
    let started = Instant::now();

    let concurrency = config.concurrency.get();
    info!("Dispatching {} workers", concurrency);
    let (results, handles) = spawn_workers(&context, concurrency, shutdown_tx);
    info!("Waiting for results...");

    let cutoff = match config.termination {
        Termination::ByCount(_) => wait_for_workers(handles, &mut interrupt_rx).await?,
        Termination::ByDuration(duration) => {
            wait_for_deadline(duration, &mut interrupt_rx).await
        }
    };
    debug!("Run cut off: {:?}", cutoff);

    let mut totals = collect_totals(&results);
    if config.termination.is_duration() && totals.discount_cutoff_failure() {
        debug!("Discounted one network failure caused by the cutoff");
    }
    let statistics = Statistics::aggregate(&totals, meter.snapshot(), started.elapsed());

    drop(shutdown_tx.send(()));
    Ok(statistics)
}

fn spawn_workers(
    context: &Arc<WorkerContext>,
    concurrency: usize,
    shutdown_tx: &ShutdownSender,
) -> (Vec<Arc<WorkerResult>>, Vec<JoinHandle<()>>) {
    let mut results = Vec::with_capacity(concurrency);
    let mut handles = Vec::with_capacity(concurrency);
    for _ in 0..concurrency {
        let result = Arc::new(WorkerResult::new());
        results.push(Arc::clone(&result));
        let shutdown_rx = shutdown_tx.subscribe();
        handles.push(tokio::spawn(run_worker(
            Arc::clone(context),
            result,
            shutdown_rx,
        )));
    }
    (results, handles)
}

async fn wait_for_workers(
    handles: Vec<JoinHandle<()>>,
    interrupt_rx: &mut ShutdownReceiver,
) -> AppResult<Cutoff> {
    tokio::select! {
        joined = join_all(handles) => {
            for outcome in joined {
                outcome?;
            }
            Ok(Cutoff::Completed)
        }
        _ = interrupt_rx.recv() => Ok(Cutoff::Interrupted),
    }
}

async fn wait_for_deadline(duration: Duration, interrupt_rx: &mut ShutdownReceiver) -> Cutoff {
    tokio::select! {
        () = sleep(duration) => Cutoff::Deadline,
        _ = interrupt_rx.recv() => Cutoff::Interrupted,
    }
}
