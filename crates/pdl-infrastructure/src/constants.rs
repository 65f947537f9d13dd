//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pdl.toml";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PDL";

/// Environment variable consulted for log filtering
pub const LOG_ENV_VAR: &str = "PDL_LOG";

// ============================================================================
// DATABASE CONSTANTS
// ============================================================================

/// Default database host
pub const DEFAULT_DB_HOST: &str = "127.0.0.1";

/// Default PostgreSQL port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default database name
pub const DEFAULT_DB_NAME: &str = "postgres";

/// Default database user
pub const DEFAULT_DB_USER: &str = "postgres";

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Application name reported to the server
pub const DEFAULT_APPLICATION_NAME: &str = "pg-distributed-lock";

// ============================================================================
// ADVISORY LOCK SQL
// ============================================================================

/// Non-blocking session-scoped acquisition of an exclusive advisory lock
pub const SQL_TRY_ADVISORY_LOCK: &str = "SELECT pg_try_advisory_lock($1)";

/// Release of a session-scoped exclusive advisory lock
pub const SQL_ADVISORY_UNLOCK: &str = "SELECT pg_advisory_unlock($1)";

/// Cheap probe used to validate a freshly opened session
pub const SQL_SESSION_PROBE: &str = "SELECT 1";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
