//! Lock identity and execution outcome value objects

use sha2::{Digest, Sha256};
use std::fmt;

/// 64-bit signed key naming a mutual-exclusion domain
///
/// No structure is imposed beyond uniqueness within the caller's chosen
/// namespace; two different identifiers are always independent locks. The
/// value maps directly onto the `bigint` key of PostgreSQL's advisory-lock
/// functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LockId(i64);

impl LockId {
    /// Create a lock identifier from a raw 64-bit key
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw 64-bit key
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Derive a lock identifier from a string lock name
    ///
    /// Hashes the name with SHA-256 and truncates to 64 bits, so any two
    /// callers deriving from the same name land on the same key. Collisions
    /// between distinct names are possible in principle; callers needing a
    /// guaranteed-disjoint namespace should assign raw keys themselves.
    pub fn from_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self(i64::from_be_bytes(bytes))
    }
}

impl From<i64> for LockId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<LockId> for i64 {
    fn from(id: LockId) -> Self {
        id.0
    }
}

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a lock-guarded execution attempt
///
/// `NotAcquired` means another session held the lock and the critical
/// section never ran. `Executed` means the lock was acquired, the critical
/// section completed, and the lock was released. The remaining case of the
/// lifecycle, acquired-but-execution-failed, travels on the error channel as
/// [`Error::CriticalSection`](crate::error::Error::CriticalSection) so it
/// cannot be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome<T> {
    /// Another session holds the lock; the critical section did not run
    NotAcquired,
    /// The lock was acquired and the critical section ran to completion
    Executed(T),
}

impl<T> LockOutcome<T> {
    /// Whether the critical section ran to completion
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }

    /// Whether the lock was held by another session
    pub fn is_not_acquired(&self) -> bool {
        matches!(self, Self::NotAcquired)
    }

    /// The critical section's value, if it ran
    pub fn into_executed(self) -> Option<T> {
        match self {
            Self::Executed(value) => Some(value),
            Self::NotAcquired => None,
        }
    }
}
