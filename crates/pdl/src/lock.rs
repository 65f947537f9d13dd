//! Distributed lock coordinator
//!
//! Ties a persistent advisory-lock session to the lock lifecycle:
//! non-blocking acquisition, guarded execution, and a release that runs on
//! every exit path of the guarded block.

use pdl_domain::error::{Error, Result};
use pdl_domain::ports::AdvisorySession;
use pdl_domain::value_objects::{LockId, LockOutcome};
use pdl_infrastructure::config::DatabaseConfig;
use pdl_infrastructure::session::PostgresSession;
use std::future::Future;
use tracing::info;

/// Distributed lock bound to one persistent database session
///
/// The session is created with the lock object and lives until
/// [`close`](Self::close) (or drop). Every acquire/release for this object
/// goes through that one session, so the session's lifetime is the lock's
/// failure domain: if it dies, the database releases whatever it held.
///
/// All methods take `&mut self`; the object supports one in-flight operation
/// at a time. For concurrent lock attempts within one process, open one
/// `DistributedLock` per attempt.
pub struct DistributedLock<S: AdvisorySession = PostgresSession> {
    session: S,
}

impl DistributedLock<PostgresSession> {
    /// Open a PostgreSQL session and bind a new lock object to it
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let session = PostgresSession::open(config).await?;
        Ok(Self::with_session(session))
    }
}

impl<S: AdvisorySession> DistributedLock<S> {
    /// Bind a lock object to an already-open session
    ///
    /// The lock object takes ownership of the session for its lifetime.
    pub fn with_session(session: S) -> Self {
        Self { session }
    }

    /// Try to acquire the advisory lock `id` without waiting
    ///
    /// `Ok(true)` iff the database granted the lock to this session;
    /// `Ok(false)` when another session holds it. Contention is a normal
    /// outcome, never an error.
    pub async fn try_acquire<I: Into<LockId>>(&mut self, id: I) -> Result<bool> {
        let id = id.into();
        info!(lock_id = id.value(), "trying to acquire session lock");
        let acquired = self.session.try_acquire(id).await?;
        if acquired {
            info!(lock_id = id.value(), "lock acquired");
        } else {
            info!(lock_id = id.value(), "lock rejected");
        }
        Ok(acquired)
    }

    /// Release the advisory lock `id`
    ///
    /// `Ok(false)` means the database reports this session did not hold the
    /// lock - a logic-error signal surfaced as a warning by the session, not
    /// a failure.
    pub async fn release<I: Into<LockId>>(&mut self, id: I) -> Result<bool> {
        let id = id.into();
        info!(lock_id = id.value(), "releasing session lock");
        self.session.release(id).await
    }

    /// Run `critical_section` if and only if the lock can be acquired
    ///
    /// Acquisition is non-blocking: if another session holds `id`, this
    /// returns [`LockOutcome::NotAcquired`] immediately and the closure is
    /// never invoked. On acquisition the closure runs exactly once, and the
    /// release is issued before control returns regardless of how the
    /// closure fared:
    ///
    /// - closure succeeded, release succeeded:
    ///   `Ok(LockOutcome::Executed(value))`
    /// - closure succeeded, release failed: [`Error::Release`]
    /// - closure failed: [`Error::CriticalSection`], with a failed release
    ///   attached as the secondary cause - the closure's error stays primary
    pub async fn execute_under_lock<I, F, Fut, T, E>(
        &mut self,
        id: I,
        critical_section: F,
    ) -> Result<LockOutcome<T>>
    where
        I: Into<LockId>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let id = id.into();
        if !self.try_acquire(id).await? {
            return Ok(LockOutcome::NotAcquired);
        }

        let section_result = critical_section().await;

        // Unconditional release before the section's result is interpreted
        let release_result = self.release(id).await;

        match (section_result, release_result) {
            (Ok(value), Ok(_)) => Ok(LockOutcome::Executed(value)),
            (Ok(_), Err(release_err)) => Err(Error::release(id, release_err)),
            (Err(section_err), release_result) => Err(Error::critical_section(
                id,
                section_err,
                release_result.err(),
            )),
        }
    }

    /// Close the underlying session, releasing every lock it holds
    ///
    /// Idempotent: calls after the first are no-ops.
    pub async fn close(&mut self) -> Result<()> {
        self.session.close().await
    }

    /// Whether the underlying session is still open
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// Consume the lock object and return the session it owned
    pub fn into_session(self) -> S {
        self.session
    }
}
