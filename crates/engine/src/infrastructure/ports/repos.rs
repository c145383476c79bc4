//! Repository port traits for character storage.

use async_trait::async_trait;
use charsmith_domain::{Character, CharacterId};

use super::error::RepoError;

/// Keyed record store for characters. No guarantees span more than one record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
    /// Insert or replace by id.
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    /// Deleting a missing id is not an error.
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}
