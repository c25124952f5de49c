// src/common/migrations.rs
//! Database schema management

use sqlx::SqlitePool;
use tracing::info;

/// Create the schema if it does not exist yet.
///
/// Identities keep their provider-assigned id as the primary key; results
/// reference them and are never updated or deleted, so the schema needs no
/// versioned migration machinery.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database schema ready");

    Ok(())
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            login TEXT NOT NULL UNIQUE,
            name TEXT,
            avatar_url TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS typetests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            wpm INTEGER NOT NULL,
            accuracy INTEGER NOT NULL,
            userid INTEGER NOT NULL,
            FOREIGN KEY (userid) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_typetests_wpm ON typetests(wpm)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_typetests_userid ON typetests(userid)")
        .execute(pool)
        .await?;

    Ok(())
}
