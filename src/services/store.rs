// src/services/store.rs
use crate::auth::models::User;
use crate::leaderboard::models::LeaderboardEntry;
use sqlx::SqlitePool;
use tracing::debug;

/// Persistence operations for identities and typing-test results.
///
/// Every operation is a single statement and returns its storage error to
/// the caller; lookups distinguish "no row" (`Ok(None)`) from a storage
/// failure (`Err`). Call sites decide whether to degrade or abort.
#[derive(Debug, Clone)]
pub struct Store {
    db: SqlitePool,
}

impl Store {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a newly authenticated identity. Fails with a unique-constraint
    /// violation if the login already exists.
    pub async fn insert_user(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, login, name, avatar_url)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id)
        .bind(&user.login)
        .bind(user.name.as_deref())
        .bind(user.avatar_url.as_deref())
        .execute(&self.db)
        .await?;

        debug!(user_id = user.id, login = %user.login, "Inserted user");
        Ok(())
    }

    /// Record one completed typing test for a user.
    pub async fn insert_result(
        &self,
        user_id: i64,
        wpm: i64,
        accuracy: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO typetests (wpm, accuracy, userid)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(wpm)
        .bind(accuracy)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        debug!(user_id = user_id, wpm = wpm, accuracy = accuracy, "Inserted result");
        Ok(())
    }

    pub async fn user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, login, name, avatar_url FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn user_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, login, name, avatar_url FROM users WHERE login = ?",
        )
        .bind(login)
        .fetch_optional(&self.db)
        .await
    }

    /// Top `limit` users by their best wpm, with the accuracy recorded on
    /// that best run. Equal-max rows for one user tie-break on the lowest
    /// result id, so the returned accuracy is deterministic.
    pub async fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT
                users.login,
                MAX(typetests.wpm) AS max_wpm,
                (SELECT accuracy FROM typetests t
                 WHERE t.userid = users.id
                 ORDER BY t.wpm DESC, t.id ASC LIMIT 1) AS accuracy
            FROM typetests
            JOIN users ON typetests.userid = users.id
            GROUP BY users.id
            ORDER BY max_wpm DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
    }
}
