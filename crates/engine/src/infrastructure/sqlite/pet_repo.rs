//! Pet repository.

use async_trait::async_trait;
use petpals_domain::{Pet, PetId};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::helpers::{decode, decode_all, encode, map_write_error, next_id};
use crate::infrastructure::ports::{ClockPort, PetRepo, RepoError};

pub struct SqlitePetRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqlitePetRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl PetRepo for SqlitePetRepo {
    async fn get(&self, id: PetId) -> Result<Option<Pet>, RepoError> {
        let row = sqlx::query("SELECT document FROM pets WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("pet.get", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn list(&self) -> Result<Vec<Pet>, RepoError> {
        let rows = sqlx::query("SELECT document FROM pets ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("pet.list", e))?;

        decode_all(&rows)
    }

    async fn save(&self, pet: &Pet) -> Result<(), RepoError> {
        let json = encode(pet)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO pets (id, document, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(pet.id().value())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("pet.save", e))?;

        Ok(())
    }

    async fn delete(&self, id: PetId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("pet.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Pet", id));
        }
        Ok(())
    }

    async fn next_id(&self) -> Result<PetId, RepoError> {
        next_id(&self.pool, "pets").await.map(PetId::new)
    }
}
