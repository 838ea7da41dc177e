//! SQLite-backed storage.
//!
//! One table per aggregate. Each row stores the aggregate as a JSON document next to
//! the columns needed for lookups and uniqueness (adoption `pet_id`, user `email`).

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, RepoError};

mod adoption_repo;
mod hero_repo;
mod helpers;
mod pet_repo;
mod user_repo;

pub use adoption_repo::SqliteAdoptionRepo;
pub use hero_repo::SqliteHeroRepo;
pub use pet_repo::SqlitePetRepo;
pub use user_repo::SqliteUserRepo;

/// All SQLite repositories sharing one connection pool.
pub struct SqliteRepositories {
    pub pet: Arc<SqlitePetRepo>,
    pub hero: Arc<SqliteHeroRepo>,
    pub adoption: Arc<SqliteAdoptionRepo>,
    pub user: Arc<SqliteUserRepo>,
}

impl SqliteRepositories {
    /// Opens (creating if needed) the database file at `db_path` and ensures the schema.
    pub async fn connect(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        ensure_schema(&pool).await?;

        Ok(Self {
            pet: Arc::new(SqlitePetRepo::new(pool.clone(), clock.clone())),
            hero: Arc::new(SqliteHeroRepo::new(pool.clone(), clock.clone())),
            adoption: Arc::new(SqliteAdoptionRepo::new(pool.clone())),
            user: Arc::new(SqliteUserRepo::new(pool, clock)),
        })
    }
}

async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id INTEGER PRIMARY KEY,
            document TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS heroes (
            id INTEGER PRIMARY KEY,
            owner_user_id INTEGER NOT NULL,
            document TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_heroes_owner ON heroes (owner_user_id)",
        r#"
        CREATE TABLE IF NOT EXISTS adoptions (
            id INTEGER PRIMARY KEY,
            hero_id INTEGER NOT NULL,
            pet_id INTEGER NOT NULL UNIQUE,
            document TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_adoptions_hero ON adoptions (hero_id)",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            document TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    tracing::debug!("SQLite schema ready");
    Ok(())
}
