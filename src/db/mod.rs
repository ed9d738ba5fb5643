//! Database module for the chores store.
//!
//! Provides read-only PostgreSQL access using SQLx. There is deliberately
//! no pool: every operation opens its own connection, runs one statement
//! and closes the connection again before returning.

mod chores;
mod names;

pub use chores::Chore;
pub use names::NameRecord;

use crate::config::{DatabaseConfig, SslMode};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};
use std::future::Future;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url is not configured")]
    NotConfigured,
    #[error("invalid database url: {0}")]
    InvalidUrl(sqlx::Error),
    #[error("failed to connect to database: {0}")]
    Connect(sqlx::Error),
    #[error("query failed: {0}")]
    Query(sqlx::Error),
}

impl DbError {
    /// Whether the store could not be reached at all, as opposed to
    /// rejecting a statement.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::Query(_))
    }

    /// Static error code for log labelling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "db_not_configured",
            Self::InvalidUrl(_) => "db_invalid_url",
            Self::Connect(_) => "db_connect",
            Self::Query(_) => "db_query",
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Query(err)
    }
}

/// Read access to chores and names.
///
/// The HTTP layer only talks to this trait, so a store can be swapped out
/// without touching routing or authentication.
#[async_trait]
pub trait ChoreStore: Send + Sync {
    /// All chores, ascending by date.
    async fn all_chores(&self) -> Result<Vec<Chore>, DbError>;

    /// Chores assigned to exactly `name`, ascending by date.
    async fn chores_for(&self, name: &str) -> Result<Vec<Chore>, DbError>;

    /// Description of the chore assigned to `name` on `date`.
    ///
    /// `None` when no row matched; `Some(None)` when a row matched but its
    /// description is NULL. `date` is handed to the store untouched; the
    /// store decides which textual formats it accepts.
    async fn chore_on(&self, name: &str, date: &str)
    -> Result<Option<Option<String>>, DbError>;

    /// Every row of the names table, in store order.
    async fn names(&self) -> Result<Vec<NameRecord>, DbError>;
}

/// PostgreSQL-backed store that connects once per operation.
pub struct PgStore {
    options: Option<PgConnectOptions>,
}

impl PgStore {
    /// Build a store from configuration.
    ///
    /// A missing URL is not an error here: the store is still constructed
    /// and every operation reports [`DbError::NotConfigured`].
    pub fn new(config: &DatabaseConfig) -> Result<Self, DbError> {
        let options = match config.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => Some(
                PgConnectOptions::from_str(url)
                    .map_err(DbError::InvalidUrl)?
                    .ssl_mode(pg_ssl_mode(config.ssl_mode)),
            ),
            None => None,
        };
        Ok(Self { options })
    }

    /// Open a fresh connection, hand it to `op`, and close it afterwards.
    ///
    /// `op` owns the connection while it runs and must hand it back along
    /// with its result, so the close happens on success and failure alike.
    async fn with_connection<T, F, Fut>(&self, op: F) -> Result<T, DbError>
    where
        F: FnOnce(PgConnection) -> Fut,
        Fut: Future<Output = (PgConnection, Result<T, sqlx::Error>)>,
    {
        let options = self.options.as_ref().ok_or(DbError::NotConfigured)?;
        let conn = PgConnection::connect_with(options)
            .await
            .map_err(DbError::Connect)?;

        let (conn, result) = op(conn).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection cleanly");
        }

        result.map_err(DbError::Query)
    }
}

#[async_trait]
impl ChoreStore for PgStore {
    async fn all_chores(&self) -> Result<Vec<Chore>, DbError> {
        let chores = self
            .with_connection(|mut conn| async move {
                let result = chores::fetch_all(&mut conn).await;
                (conn, result)
            })
            .await?;
        debug!(rows = chores.len(), "Fetched all chores");
        Ok(chores)
    }

    async fn chores_for(&self, name: &str) -> Result<Vec<Chore>, DbError> {
        let chores = self
            .with_connection(|mut conn| async move {
                let result = chores::fetch_by_name(&mut conn, name).await;
                (conn, result)
            })
            .await?;
        debug!(name = %name, rows = chores.len(), "Fetched chores by name");
        Ok(chores)
    }

    async fn chore_on(
        &self,
        name: &str,
        date: &str,
    ) -> Result<Option<Option<String>>, DbError> {
        let description = self
            .with_connection(|mut conn| async move {
                let result = chores::fetch_description(&mut conn, name, date).await;
                (conn, result)
            })
            .await?;
        debug!(name = %name, date = %date, found = description.is_some(), "Fetched chore by date");
        Ok(description)
    }

    async fn names(&self) -> Result<Vec<NameRecord>, DbError> {
        let names = self
            .with_connection(|mut conn| async move {
                let result = names::fetch_all(&mut conn).await;
                (conn, result)
            })
            .await?;
        debug!(rows = names.len(), "Fetched names");
        Ok(names)
    }
}

fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_reports_not_configured() {
        let store = PgStore::new(&DatabaseConfig::default()).unwrap();
        let err = store.all_chores().await.unwrap_err();
        assert!(matches!(err, DbError::NotConfigured));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_empty_url_treated_as_unconfigured() {
        let config = DatabaseConfig {
            url: Some(String::new()),
            ..DatabaseConfig::default()
        };
        let store = PgStore::new(&config).unwrap();
        let err = store.names().await.unwrap_err();
        assert!(matches!(err, DbError::NotConfigured));
    }

    #[tokio::test]
    async fn test_with_connection_skips_op_without_connection() {
        let store = PgStore::new(&DatabaseConfig::default()).unwrap();
        let ran = std::sync::atomic::AtomicBool::new(false);
        let result: Result<(), DbError> = store
            .with_connection(|conn| {
                ran.store(true, std::sync::atomic::Ordering::SeqCst);
                async move { (conn, Ok(())) }
            })
            .await;
        assert!(matches!(result, Err(DbError::NotConfigured)));
        assert!(!ran.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_garbage_url_rejected() {
        let config = DatabaseConfig {
            url: Some("not a url".to_string()),
            ..DatabaseConfig::default()
        };
        assert!(matches!(PgStore::new(&config), Err(DbError::InvalidUrl(_))));
    }

    #[test]
    fn test_query_errors_are_not_unavailability() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unavailable());
        assert_eq!(err.error_code(), "db_query");
    }
}
