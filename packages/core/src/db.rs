//! SQLite pool construction and schema setup.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS documents (
        collection TEXT NOT NULL,
        id         TEXT NOT NULL,
        user_id    TEXT,
        body       TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        PRIMARY KEY (collection, id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents (collection, user_id)",
];

/// Open a pool for `database_url` and make sure the schema exists.
///
/// An in-memory database lives only as long as its connection, so those
/// pools are pinned to one connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for &statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Schema ready ({} statements)", SCHEMA.len());
    Ok(())
}
