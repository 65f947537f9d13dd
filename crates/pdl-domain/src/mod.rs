//! # Domain Layer
//!
//! Core lock semantics for `pg-distributed-lock`, independent of any
//! database driver or I/O concern.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`ports`] | Contracts implemented by infrastructure adapters |
//! | [`value_objects`] | Lock identifiers and execution outcomes |

pub mod error;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::AdvisorySession;
pub use value_objects::{LockId, LockOutcome};
