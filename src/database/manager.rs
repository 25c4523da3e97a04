use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the data access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// A row with the same key (id or slug) already exists
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Duplicate(_) => true,
            DatabaseError::Sqlx(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

/// Statements run at startup, in order. Each is idempotent.
///
/// `movies.created` and `genres.position` record insertion order, which
/// unsorted listings and genre lists are returned in.
const SCHEMA: [&str; 6] = [
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        id UUID PRIMARY KEY,
        slug TEXT NOT NULL,
        title TEXT NOT NULL,
        yearofrelease INTEGER NOT NULL,
        created BIGSERIAL NOT NULL
    )
    "#,
    "ALTER TABLE movies ADD COLUMN IF NOT EXISTS created BIGSERIAL NOT NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS movies_slug_idx ON movies USING btree (slug)",
    r#"
    CREATE TABLE IF NOT EXISTS genres (
        movieid UUID REFERENCES movies (id),
        name TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "ALTER TABLE genres ADD COLUMN IF NOT EXISTS position INTEGER NOT NULL DEFAULT 0",
    r#"
    CREATE TABLE IF NOT EXISTS ratings (
        userid UUID,
        movieid UUID REFERENCES movies (id),
        rating INTEGER NOT NULL,
        PRIMARY KEY (userid, movieid)
    )
    "#,
];

/// Owns the connection pool for the movies database
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Open the pool. Connections are acquired per operation and returned on drop.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn initialize(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema initialized");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
