//! Error handling types

use crate::value_objects::LockId;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type for foreign error sources
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for pg-distributed-lock
///
/// Contention is not an error: a rejected acquisition is reported as a
/// normal `false` / `LockOutcome::NotAcquired` result. Everything here is a
/// genuine failure surfaced to the immediate caller; nothing is retried
/// internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Session could not be established or is no longer usable
    ///
    /// Fatal to any further lock operation on the owning lock object until a
    /// new session is opened.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection failure
        message: String,
        /// Optional source error
        source: Option<BoxError>,
    },

    /// An individual acquire/release request failed at the protocol level
    ///
    /// The session appeared open but the request did not complete. Distinct
    /// from a `false` acquisition result, which is plain contention.
    #[error("Session error: {message}")]
    Session {
        /// Description of the request failure
        message: String,
        /// Optional source error
        source: Option<BoxError>,
    },

    /// The caller-supplied critical section failed while the lock was held
    ///
    /// Release was attempted before this error was propagated. If that
    /// release also failed, its error rides along in `release`; the
    /// critical-section error stays the primary cause.
    #[error("Critical section failed under lock {lock_id}: {source}")]
    CriticalSection {
        /// Identifier of the lock held while the critical section ran
        lock_id: LockId,
        /// The error raised by the critical section
        source: BoxError,
        /// Release failure that followed, if any
        release: Option<Box<Error>>,
    },

    /// Release failed after the critical section completed successfully
    #[error("Failed to release lock {lock_id}")]
    Release {
        /// Identifier of the lock that could not be released
        lock_id: LockId,
        /// The underlying release failure
        source: Box<Error>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        source: Option<BoxError>,
    },

    /// Infrastructure error outside the connection/session taxonomy
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        source: Option<BoxError>,
    },
}

impl Error {
    /// Create a connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with a source
    pub fn connection_with<S: Into<String>, E: Into<BoxError>>(message: S, source: E) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a session error
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
            source: None,
        }
    }

    /// Create a session error with a source
    pub fn session_with<S: Into<String>, E: Into<BoxError>>(message: S, source: E) -> Self {
        Self::Session {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a critical-section error, carrying any release failure that
    /// followed it as the secondary cause
    pub fn critical_section<E: Into<BoxError>>(
        lock_id: LockId,
        source: E,
        release: Option<Error>,
    ) -> Self {
        Self::CriticalSection {
            lock_id,
            source: source.into(),
            release: release.map(Box::new),
        }
    }

    /// Create a release error for a failure after a successful critical
    /// section
    pub fn release(lock_id: LockId, source: Error) -> Self {
        Self::Release {
            lock_id,
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with a source
    pub fn config_with<S: Into<String>, E: Into<BoxError>>(message: S, source: E) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with a source
    pub fn infrastructure_with<S: Into<String>, E: Into<BoxError>>(message: S, source: E) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The release failure that followed a failed critical section, if any
    pub fn release_failure(&self) -> Option<&Error> {
        match self {
            Self::CriticalSection { release, .. } => release.as_deref(),
            _ => None,
        }
    }

    /// Whether this error makes the session unusable for further operations
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
