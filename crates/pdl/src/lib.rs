//! # pg-distributed-lock
//!
//! Mutual exclusion across independent processes sharing a PostgreSQL
//! database, built on session-scoped advisory locks. A lock object owns one
//! persistent session; a critical section run under a lock identifier has at
//! most one concurrent executor cluster-wide.
//!
//! ## Example
//!
//! ```no_run
//! use pdl::{DatabaseConfig, DistributedLock, LockId};
//!
//! # async fn example() -> pdl::Result<()> {
//! let config = DatabaseConfig::from_url("postgresql://locker@db.internal/jobs");
//! let mut lock = DistributedLock::connect(&config).await?;
//!
//! let outcome = lock
//!     .execute_under_lock(LockId::new(42), || async {
//!         // at most one process runs this at a time, cluster-wide
//!         sweep_expired_invoices().await
//!     })
//!     .await?;
//!
//! if outcome.is_not_acquired() {
//!     // another process holds the lock; nothing ran
//! }
//!
//! lock.close().await?;
//! # Ok(())
//! # }
//! # async fn sweep_expired_invoices() -> Result<(), std::io::Error> { Ok(()) }
//! ```
//!
//! ## Architecture
//!
//! The codebase follows a layered layout:
//!
//! - `domain` - lock semantics: identifiers, outcomes, errors, and the
//!   session port
//! - `infrastructure` - the PostgreSQL session adapter, configuration, and
//!   logging bootstrap
//! - [`lock`] - the coordinator tying a session to the
//!   acquire/execute/release lifecycle
//!
//! ## Concurrency model
//!
//! One session supports one in-flight operation; the coordinator's `&mut`
//! receivers enforce that. Processes needing concurrent lock attempts open
//! one lock object per attempt - the sessions contend at the database, which
//! arbitrates.

/// Lock coordinator
pub mod lock;

/// Domain layer - re-exports from the domain crate for convenience
pub mod domain {
    pub use pdl_domain::*;
}

/// Infrastructure layer - re-exports from the infrastructure crate for
/// convenience
pub mod infrastructure {
    pub use pdl_infrastructure::*;
}

// Re-export the working surface at the crate root
pub use lock::DistributedLock;
pub use pdl_domain::{AdvisorySession, Error, LockId, LockOutcome, Result};
pub use pdl_infrastructure::config::{AppConfig, ConfigLoader, DatabaseConfig, LoggingConfig};
pub use pdl_infrastructure::logging::init_logging;
pub use pdl_infrastructure::session::PostgresSession;
