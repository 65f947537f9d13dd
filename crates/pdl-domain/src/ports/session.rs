//! Advisory Session Port
//!
//! Defines the contract for the persistent database session that carries
//! advisory-lock traffic. The session is the unit advisory locks are scoped
//! to: when it terminates, the database releases every lock it held.

use crate::error::Result;
use crate::value_objects::LockId;
use async_trait::async_trait;

/// One persistent advisory-lock session
///
/// All operations take `&mut self`: a session supports at most one in-flight
/// request at a time, and the exclusive receiver makes concurrent calls on a
/// shared session a compile error rather than a runtime hazard. Callers who
/// need concurrent lock attempts open one session per attempt.
#[async_trait]
pub trait AdvisorySession: Send + Sync {
    /// Try to acquire the session-scoped exclusive lock `id`
    ///
    /// Non-blocking: returns `Ok(true)` iff the database granted the lock to
    /// this session, `Ok(false)` if another session currently holds it, and
    /// `Err(Error::Session)` if the request itself failed. A `false` result
    /// is contention, never an error.
    async fn try_acquire(&mut self, id: LockId) -> Result<bool>;

    /// Release the session-scoped exclusive lock `id`
    ///
    /// Returns `Ok(false)` when the database reports the lock was not held
    /// by this session — a logic-error signal the adapter surfaces as a
    /// warning, not a failure.
    async fn release(&mut self, id: LockId) -> Result<bool>;

    /// Close the session, releasing every lock it holds
    ///
    /// Idempotent: calls after the first are no-ops.
    async fn close(&mut self) -> Result<()>;

    /// Whether the session is still open
    fn is_open(&self) -> bool;
}
