//! SQLite-backed record store.
//!
//! Each character is one JSON document in a row keyed by (owner, name).

use std::sync::Arc;

use async_trait::async_trait;
use charsheet_domain::{Character, CharacterName, OwnerId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

/// SQLite implementation of the record store.
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                owner TEXT NOT NULL,
                name TEXT NOT NULL,
                character_json TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (owner, name)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("migrate", e))?;

        Ok(Self { pool, clock })
    }

    fn decode(row: &sqlx::sqlite::SqliteRow) -> Result<Character, RepoError> {
        let json: String = row.get("character_json");
        serde_json::from_str(&json).map_err(RepoError::serialization)
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn load(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT character_json FROM characters WHERE owner = ? AND name = ?")
            .bind(owner.as_str())
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("load", e))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let json = serde_json::to_string(character).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO characters (owner, name, character_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(owner, name) DO UPDATE SET
                character_json = excluded.character_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(character.owner().as_str())
        .bind(character.name().as_str())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save", e))?;

        Ok(())
    }

    async fn list(&self, owner: &OwnerId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(
            "SELECT name, character_json FROM characters WHERE owner = ? ORDER BY name",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list", e))?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            match Self::decode(row) {
                Ok(character) => characters.push(character),
                Err(e) => {
                    let name: String = row.get("name");
                    tracing::warn!(%owner, character = %name, error = %e, "Skipping unreadable record");
                }
            }
        }
        // SQLite orders by byte value; keep the same order as the name type
        characters.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(characters)
    }

    async fn delete(&self, owner: &OwnerId, name: &CharacterName) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE owner = ? AND name = ?")
            .bind(owner.as_str())
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", name));
        }
        Ok(())
    }
}
