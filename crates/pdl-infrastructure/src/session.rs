//! PostgreSQL advisory-lock session adapter
//!
//! Owns the one persistent connection a lock object issues all of its
//! advisory-lock traffic on. Advisory locks are scoped to this session: the
//! database releases every lock the session holds the moment the session
//! terminates, cleanly or not.

use crate::config::DatabaseConfig;
use crate::constants::{SQL_ADVISORY_UNLOCK, SQL_SESSION_PROBE, SQL_TRY_ADVISORY_LOCK};
use async_trait::async_trait;
use pdl_domain::error::{Error, Result};
use pdl_domain::ports::AdvisorySession;
use pdl_domain::value_objects::LockId;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, warn};

/// One persistent PostgreSQL session carrying advisory-lock traffic
///
/// Created by [`PostgresSession::open`], which connects, spawns the
/// connection driver task, and probes the session before handing it over.
/// The session stays open across arbitrarily many acquire/release cycles
/// until [`close`](AdvisorySession::close) is called (or the value is
/// dropped, which tears the connection down through the driver task).
pub struct PostgresSession {
    client: Option<Client>,
    driver: Option<JoinHandle<()>>,
}

impl PostgresSession {
    /// Open and validate a new session against the configured target
    ///
    /// Fails with [`Error::Connection`] if the target is unreachable, the
    /// credentials are rejected, or the validation probe does not come back.
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let pg_config = resolve_pg_config(config)?;

        let (client, connection) = pg_config.connect(NoTls).await.map_err(|e| {
            Error::connection_with(
                format!("Failed to connect to database at {}", config.endpoint()),
                e,
            )
        })?;

        // The connection half multiplexes the socket until the client half
        // is dropped; an error here means the session died under us.
        let driver = tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!(error = %err, "database session terminated with error");
            }
        });

        // Round-trip once so a dead-on-arrival session fails open(), not the
        // first lock operation.
        client
            .batch_execute(SQL_SESSION_PROBE)
            .await
            .map_err(|e| Error::connection_with("Session validation probe failed", e))?;

        debug!(endpoint = %config.endpoint(), "database session opened");

        Ok(Self {
            client: Some(client),
            driver: Some(driver),
        })
    }

    fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| Error::session("Session is closed"))
    }
}

#[async_trait]
impl AdvisorySession for PostgresSession {
    async fn try_acquire(&mut self, id: LockId) -> Result<bool> {
        let key = id.value();
        let row = self
            .client()?
            .query_one(SQL_TRY_ADVISORY_LOCK, &[&key])
            .await
            .map_err(|e| {
                Error::session_with(format!("pg_try_advisory_lock({}) request failed", id), e)
            })?;
        Ok(row.get::<_, bool>(0))
    }

    async fn release(&mut self, id: LockId) -> Result<bool> {
        let key = id.value();
        let row = self
            .client()?
            .query_one(SQL_ADVISORY_UNLOCK, &[&key])
            .await
            .map_err(|e| {
                Error::session_with(format!("pg_advisory_unlock({}) request failed", id), e)
            })?;
        let released: bool = row.get(0);
        if !released {
            // The database reports the lock was not held by this session.
            // A logic-error signal, not a failure.
            warn!(lock_id = key, "released an advisory lock this session did not hold");
        }
        Ok(released)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            // Dropping the client half lets the driver task drain and exit,
            // and the server releases every advisory lock the session held.
            drop(client);
            if let Some(driver) = self.driver.take() {
                let _ = driver.await;
            }
            debug!("database session closed");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.client.is_some()
    }
}

/// Resolve the database configuration into a driver configuration
///
/// A non-empty connection string wins; otherwise the discrete fields are
/// assembled. Credentials never appear in error messages.
fn resolve_pg_config(config: &DatabaseConfig) -> Result<tokio_postgres::Config> {
    if !config.url.is_empty() {
        return config
            .url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| Error::config_with("Invalid database connection string", e));
    }

    let mut pg_config = tokio_postgres::Config::new();
    pg_config
        .host(&config.host)
        .port(config.port)
        .user(&config.user)
        .dbname(&config.dbname);
    if !config.password.is_empty() {
        pg_config.password(&config.password);
    }
    if !config.application_name.is_empty() {
        pg_config.application_name(&config.application_name);
    }
    if config.connect_timeout > Duration::ZERO {
        pg_config.connect_timeout(config.connect_timeout);
    }
    Ok(pg_config)
}
