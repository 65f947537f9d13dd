//! Configuration
//!
//! TOML + environment configuration for the lock library, merged through
//! Figment and validated before use.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`loader`] | Merges defaults, TOML file, and environment variables |
//! | [`types`] | Configuration structs with validation rules |

/// Configuration loading service
pub mod loader;
/// Configuration types
pub mod types;

// Re-export commonly used types
pub use loader::ConfigLoader;
pub use types::{AppConfig, DatabaseConfig, LoggingConfig};
