//! Adoption repository.
//!
//! `pet_id` is a UNIQUE column, so a second adoption of the same pet fails at the
//! database even when two requests pass the application-level check concurrently.

use async_trait::async_trait;
use petpals_domain::{Adoption, AdoptionId, HeroId, PetId};
use sqlx::SqlitePool;

use super::helpers::{decode, decode_all, encode, map_write_error, next_id};
use crate::infrastructure::ports::{AdoptionRepo, RepoError};

pub struct SqliteAdoptionRepo {
    pool: SqlitePool,
}

impl SqliteAdoptionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdoptionRepo for SqliteAdoptionRepo {
    async fn list(&self) -> Result<Vec<Adoption>, RepoError> {
        let rows = sqlx::query("SELECT document FROM adoptions ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("adoption.list", e))?;

        decode_all(&rows)
    }

    async fn find_by_pet(&self, pet_id: PetId) -> Result<Option<Adoption>, RepoError> {
        let row = sqlx::query("SELECT document FROM adoptions WHERE pet_id = ?")
            .bind(pet_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("adoption.find_by_pet", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn list_by_hero(&self, hero_id: HeroId) -> Result<Vec<Adoption>, RepoError> {
        let rows = sqlx::query("SELECT document FROM adoptions WHERE hero_id = ? ORDER BY id")
            .bind(hero_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("adoption.list_by_hero", e))?;

        decode_all(&rows)
    }

    async fn save(&self, adoption: &Adoption) -> Result<(), RepoError> {
        let json = encode(adoption)?;

        sqlx::query(
            r#"
            INSERT INTO adoptions (id, hero_id, pet_id, document)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                hero_id = excluded.hero_id,
                pet_id = excluded.pet_id,
                document = excluded.document
            "#,
        )
        .bind(adoption.id().value())
        .bind(adoption.hero_id().value())
        .bind(adoption.pet_id().value())
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("adoption.save", e))?;

        Ok(())
    }

    async fn next_id(&self) -> Result<AdoptionId, RepoError> {
        next_id(&self.pool, "adoptions").await.map(AdoptionId::new)
    }
}
