//! Skip-vs-fail classification.
//!
//! The one authoritative place where a readiness outcome plus the strict
//! availability flag becomes a decision for the surrounding test runner.

use super::ReadinessOutcome;
use crate::endpoint::Endpoint;
use crate::probe::probe;
use sqlx::postgres::PgPool;
use std::time::Duration;
use tracing::{info, warn};

/// What the surrounding test runner should do.
#[derive(Debug, Clone)]
pub enum Decision {
    /// The service is ready; run tests against this pool.
    Proceed(PgPool),

    /// The environment is absent; report tests as skipped, not failed.
    Skip(String),

    /// The environment was required but is not available.
    Fail(String),
}

impl Decision {
    /// Human-readable reason, if the decision carries one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Proceed(_) => None,
            Decision::Skip(reason) | Decision::Fail(reason) => Some(reason),
        }
    }

    /// Short machine-readable tag for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Proceed(_) => "proceed",
            Decision::Skip(_) => "skip",
            Decision::Fail(_) => "fail",
        }
    }
}

/// Turn a readiness outcome into a decision.
///
/// `Ready` always proceeds. `Unready` skips by default, since an absent
/// environment means "tests not applicable here", and fails only when
/// `require_available` opts into strict mode. Pure: the same inputs always
/// produce the same decision.
pub fn classify(outcome: &ReadinessOutcome, require_available: bool) -> Decision {
    match outcome {
        ReadinessOutcome::Ready(pool) => Decision::Proceed(pool.clone()),
        ReadinessOutcome::Unready {
            last_error,
            elapsed,
        } => {
            let cause = last_error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no connection attempt was made".to_string());
            let waited = elapsed.as_secs_f64();

            if require_available {
                let reason = format!(
                    "database not ready after {waited:.1}s: {cause} \
                     (strict availability was requested via PGREADY_REQUIRE_DB)"
                );
                warn!(%reason, "Classified readiness outcome as fail");
                Decision::Fail(reason)
            } else {
                let reason = format!(
                    "database not ready after {waited:.1}s: {cause}; \
                     set PGREADY_REQUIRE_DB=1 to fail instead of skipping"
                );
                info!(%reason, "Classified readiness outcome as skip");
                Decision::Skip(reason)
            }
        }
    }
}

/// Closed-port short-circuit ahead of the full readiness loop.
///
/// When the port is not even accepting TCP connections and availability is
/// not required, skip within one probe timeout instead of spending the
/// whole readiness deadline. In strict mode this returns `None` so the
/// full protocol loop runs and the eventual failure reason is specific.
pub async fn precheck(
    endpoint: &Endpoint,
    probe_timeout: Duration,
    require_available: bool,
) -> Option<Decision> {
    if require_available {
        return None;
    }

    let result = probe(endpoint, probe_timeout).await;
    if result.reachable {
        return None;
    }

    let reason = format!(
        "nothing is listening on {endpoint}; \
         set PGREADY_REQUIRE_DB=1 to fail instead of skipping"
    );
    info!(%reason, "Skipping before the readiness loop");
    Some(Decision::Skip(reason))
}
