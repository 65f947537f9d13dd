//! Ports
//!
//! Contracts the lock coordinator depends on, implemented by infrastructure
//! adapters. Keeping the traits here lets the domain stay free of driver
//! concerns while adapters and test doubles plug in from the outside.

/// Advisory-lock session contract
pub mod session;

// Re-export commonly used ports
pub use session::AdvisorySession;
