//! SQLite-backed character storage, one JSON row per character.

use async_trait::async_trait;
use charsmith_domain::{Character, CharacterId};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

/// SQLite implementation of [`CharacterRepo`].
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterRepo {
    pub async fn new(db_path: &Path, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                character_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_characters_table", e))?;

        tracing::debug!(path = %db_path.display(), "Opened character database");
        Ok(Self { pool, clock })
    }

    /// Parse a stored row, rejecting records that break a character invariant.
    fn decode(json: &str) -> Result<Character, RepoError> {
        let character: Character = serde_json::from_str(json).map_err(RepoError::serialization)?;
        character.validate().map_err(RepoError::serialization)?;
        Ok(character)
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT character_json FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_character", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("character_json");
                Ok(Some(Self::decode(&json)?))
            }
            None => Ok(None),
        }
    }

    /// Rows that fail to decode are logged and skipped.
    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT id, character_json FROM characters ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_characters", e))?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row.get("id");
            let json: String = row.get("character_json");
            match Self::decode(&json) {
                Ok(character) => characters.push(character),
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Skipping unreadable character row");
                }
            }
        }
        Ok(characters)
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let json = serde_json::to_string(character).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO characters (id, name, character_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                character_json = excluded.character_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(character.id().to_string())
        .bind(character.name())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_character", e))?;

        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use charsmith_domain::game_systems::{derive, level_up};
    use charsmith_domain::{Ability, CreationInput, RuleSet};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn character(name: &str) -> Character {
        let input = CreationInput {
            name: name.to_string(),
            race: "dwarf".to_string(),
            class: "cleric".to_string(),
            ability_scores: Ability::ALL.iter().map(|&a| (a, 12)).collect(),
            level: 1,
            ..Default::default()
        };
        derive(&input, &RuleSet::srd()).unwrap()
    }

    async fn repo(dir: &TempDir) -> SqliteCharacterRepo {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        SqliteCharacterRepo::new(&dir.path().join("characters.db"), Arc::new(clock))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;
        let original = character("Thora");

        repo.save(&original).await.unwrap();

        assert_eq!(repo.get(original.id()).await.unwrap(), Some(original.clone()));
        let updated_at: String = sqlx::query_scalar("SELECT updated_at FROM characters WHERE id = ?")
            .bind(original.id().to_string())
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(updated_at, "2025-03-01T09:00:00+00:00");
    }

    async fn insert_raw(repo: &SqliteCharacterRepo, id: &str, name: &str, json: &str) {
        sqlx::query(
            "INSERT INTO characters (id, name, character_json, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(json)
        .bind("2025-03-01T09:00:00+00:00")
        .execute(&repo.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn list_skips_unreadable_rows() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;
        repo.save(&character("Aldric")).await.unwrap();
        repo.save(&character("Vex")).await.unwrap();
        insert_raw(&repo, "not-a-character", "Mangled", "{not json").await;

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["Aldric", "Vex"]);
    }

    #[tokio::test]
    async fn rows_breaking_invariants_are_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;
        let original = character("Thora");
        let mut value = serde_json::to_value(&original).unwrap();
        value["spellcasting"]["usedSpellSlots"][0] = serde_json::json!(7);
        insert_raw(&repo, &original.id().to_string(), "Thora", &value.to_string()).await;

        assert!(matches!(
            repo.get(original.id()).await,
            Err(RepoError::Serialization(_))
        ));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_replaces_existing_row() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;
        let original = character("Thora");
        repo.save(&original).await.unwrap();

        let (leveled, _) = level_up(&original, &RuleSet::srd()).unwrap();
        repo.save(&leveled).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].level(), 2);
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;
        repo.save(&character("Vex")).await.unwrap();
        repo.save(&character("Aldric")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["Aldric", "Vex"]);
    }

    #[tokio::test]
    async fn delete_removes_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;
        let original = character("Thora");
        repo.save(&original).await.unwrap();

        repo.delete(original.id()).await.unwrap();
        repo.delete(original.id()).await.unwrap();

        assert_eq!(repo.get(original.id()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn data_survives_reopening() {
        let dir = TempDir::new().unwrap();
        let original = character("Thora");
        repo(&dir).await.save(&original).await.unwrap();

        let reopened = repo(&dir).await;

        assert_eq!(reopened.get(original.id()).await.unwrap(), Some(original));
    }
}
