//! pgready - connectivity-readiness and fixture harness for Postgres-wire
//! integration tests.
//!
//! This crate decides, once per test session, whether a remote SQL service
//! is reachable and healthy; classifies the answer into proceed / skip /
//! fail; and hands test bodies scoped transactional resources that are
//! always rolled back.
//!
//! # Features
//!
//! - **Layered health check**: a raw TCP probe first, then a minimal
//!   protocol round trip (`SELECT 1`) through a pooled connection.
//! - **Bounded retry**: the readiness loop waits up to a wall-clock
//!   deadline and never hangs the process.
//! - **Skip vs. fail in one place**: an absent environment skips by
//!   default; `PGREADY_REQUIRE_DB=1` turns it into a failure for CI.
//! - **Leak-free fixtures**: per-test transaction scopes roll back on every
//!   exit path, including panics.
//!
//! # Example
//!
//! ```no_run
//! use pgready::{Harness, SessionUnavailable};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let harness = Harness::from_env()?;
//!
//!     let session = match harness.session().await {
//!         Ok(session) => session,
//!         Err(SessionUnavailable::Skipped(reason)) => {
//!             eprintln!("skipping: {reason}");
//!             return Ok(());
//!         }
//!         Err(SessionUnavailable::Failed(reason)) => anyhow::bail!(reason),
//!     };
//!
//!     let mut scope = session.begin().await?;
//!     sqlx::query("INSERT INTO t (id) VALUES (1)")
//!         .execute(scope.conn())
//!         .await?;
//!     // Dropping the scope rolls the insert back.
//!
//!     harness.close().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod endpoint;
pub mod fixture;
pub mod pool;
pub mod probe;
pub mod readiness;

pub use config::{ConfigError, HarnessConfig};
pub use endpoint::Endpoint;
pub use fixture::{Harness, SessionHandle, SessionUnavailable, TransactionScope};
pub use readiness::decision::Decision;
pub use readiness::{ReadinessError, ReadinessOutcome};
