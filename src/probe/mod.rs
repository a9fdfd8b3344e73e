//! Raw transport reachability probe.
//!
//! A single short-timeout TCP connection attempt, with no protocol
//! semantics and no retry. Callers that want retries call [`probe`] again.

use crate::endpoint::Endpoint;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::debug;

/// Default bound on a single probe attempt.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(300);

/// Result of one reachability probe. Transient; produced per attempt and
/// not retained.
#[derive(Debug, Clone, Copy)]
pub struct ProbeResult {
    pub reachable: bool,
    pub at: Instant,
}

/// Attempt a raw TCP connection to the endpoint, bounded by `timeout`.
///
/// Any transport-level failure (refused, timeout, unreachable, failed name
/// resolution) yields `reachable = false`; this never returns an error.
pub async fn probe(endpoint: &Endpoint, timeout: Duration) -> ProbeResult {
    let at = Instant::now();

    let reachable = matches!(
        tokio::time::timeout(
            timeout,
            TcpStream::connect((endpoint.host(), endpoint.port())),
        )
        .await,
        Ok(Ok(_))
    );

    debug!(
        endpoint = %endpoint,
        reachable,
        elapsed_ms = at.elapsed().as_millis() as u64,
        "TCP probe completed"
    );

    ProbeResult { reachable, at }
}
