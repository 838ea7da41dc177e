//! Hero repository.

use async_trait::async_trait;
use petpals_domain::{Hero, HeroId, UserId};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::helpers::{decode, decode_all, encode, map_write_error, next_id};
use crate::infrastructure::ports::{ClockPort, HeroRepo, RepoError};

pub struct SqliteHeroRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteHeroRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl HeroRepo for SqliteHeroRepo {
    async fn get(&self, id: HeroId) -> Result<Option<Hero>, RepoError> {
        let row = sqlx::query("SELECT document FROM heroes WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("hero.get", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn list(&self) -> Result<Vec<Hero>, RepoError> {
        let rows = sqlx::query("SELECT document FROM heroes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("hero.list", e))?;

        decode_all(&rows)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Hero>, RepoError> {
        let rows = sqlx::query("SELECT document FROM heroes WHERE owner_user_id = ? ORDER BY id")
            .bind(owner.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("hero.list_by_owner", e))?;

        decode_all(&rows)
    }

    async fn save(&self, hero: &Hero) -> Result<(), RepoError> {
        let json = encode(hero)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO heroes (id, owner_user_id, document, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                owner_user_id = excluded.owner_user_id,
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(hero.id().value())
        .bind(hero.owner_user_id().value())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("hero.save", e))?;

        Ok(())
    }

    async fn delete(&self, id: HeroId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("hero.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Hero", id));
        }
        Ok(())
    }

    async fn next_id(&self) -> Result<HeroId, RepoError> {
        next_id(&self.pool, "heroes").await.map(HeroId::new)
    }
}
