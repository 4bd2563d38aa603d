use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;

use crate::domain::RunConfig;
use crate::metrics::ThroughputMeter;

use super::connector::MeteredConnector;

pub(crate) type BenchClient = Client<MeteredConnector, Full<Bytes>>;

/// Builds the client shared by all workers of a run.
///
/// Connection setup is bounded by the write timeout. With keep-alive the pool
/// keeps one idle connection per worker; without it nothing is pooled.
pub(crate) fn build_client(config: &RunConfig, meter: Arc<ThroughputMeter>) -> BenchClient {
    let mut http = HttpConnector::new();
    http.set_connect_timeout(Some(config.write_timeout));
    http.set_nodelay(true);

    let mut builder = Client::builder(TokioExecutor::new());
    if config.keep_alive {
        builder.pool_max_idle_per_host(config.concurrency.get());
    } else {
        builder.pool_max_idle_per_host(0);
    }
    builder.build(MeteredConnector::new(http, meter))
}
