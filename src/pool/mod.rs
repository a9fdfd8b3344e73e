//! Pooled connection factory.
//!
//! Builds a lazily-connecting `PgPool` bound to an endpoint. The factory
//! performs no retries of its own: a dead endpoint surfaces from the first
//! acquire as a typed error within one `connect_timeout`, and all retry
//! policy lives in the readiness poller above.

use crate::config::{ConfigError, PoolConfig};
use crate::endpoint::Endpoint;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::debug;

/// Factory configuration, reduced to what connection behavior needs.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Bound on how long a single connection attempt (pool acquire) may
    /// block.
    pub connect_timeout: Duration,

    /// Run a liveness check before handing out a pooled connection.
    pub validate_on_checkout: bool,

    pub min_connections: u32,
    pub max_connections: u32,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            validate_on_checkout: true,
            min_connections: 0,
            max_connections: 5,
        }
    }
}

impl PoolSettings {
    pub fn from_config(pool: &PoolConfig, connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            validate_on_checkout: pool.validate_on_checkout,
            min_connections: pool.min_connections,
            max_connections: pool.max_connections,
        }
    }
}

/// Build a pool for the endpoint without performing any I/O.
///
/// Connections are established on first acquire, so creating the pool
/// cannot hang; each acquire is bounded by `connect_timeout` and fails
/// with a typed `sqlx::Error` instead of blocking past it. The pool holds
/// its transport resources until [`PgPool::close`] is called.
///
/// Must be called from within a tokio runtime context: the pool spawns
/// its maintenance tasks at creation and panics without one.
pub fn create_pool(endpoint: &Endpoint, settings: &PoolSettings) -> Result<PgPool, ConfigError> {
    debug!(
        endpoint = %endpoint,
        connect_timeout_secs = settings.connect_timeout.as_secs(),
        validate_on_checkout = settings.validate_on_checkout,
        "Creating connection pool"
    );

    let pool = PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.connect_timeout)
        .test_before_acquire(settings.validate_on_checkout)
        .connect_lazy(endpoint.url())
        .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

    Ok(pool)
}
