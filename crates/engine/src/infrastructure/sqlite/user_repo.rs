//! User repository.

use async_trait::async_trait;
use petpals_domain::{Email, User, UserId};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::helpers::{decode, encode, map_write_error, next_id};
use crate::infrastructure::ports::{ClockPort, RepoError, UserRepo};

pub struct SqliteUserRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT document FROM users WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("user.get", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT document FROM users WHERE email = ?")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("user.get_by_email", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        let json = encode(user)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, document, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user.id().value())
        .bind(user.email().as_str())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("user.save", e))?;

        Ok(())
    }

    async fn next_id(&self) -> Result<UserId, RepoError> {
        next_id(&self.pool, "users").await.map(UserId::new)
    }
}
