//! In-memory character storage for tests and throwaway sessions.

use async_trait::async_trait;
use charsmith_domain::{Character, CharacterId};
use dashmap::DashMap;

use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// [`CharacterRepo`] backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, Character>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.characters.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let mut all: Vec<Character> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        Ok(all)
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.characters.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsmith_domain::game_systems::derive;
    use charsmith_domain::{CreationInput, RuleSet};

    fn character(name: &str) -> Character {
        let input = CreationInput {
            name: name.to_string(),
            race: "human".to_string(),
            class: "rogue".to_string(),
            level: 1,
            ..Default::default()
        };
        derive(&input, &RuleSet::srd()).unwrap()
    }

    #[tokio::test]
    async fn stores_and_deletes() {
        let repo = InMemoryCharacterRepo::new();
        let rogue = character("Nim");

        repo.save(&rogue).await.unwrap();
        assert_eq!(repo.get(rogue.id()).await.unwrap(), Some(rogue.clone()));

        repo.delete(rogue.id()).await.unwrap();
        assert!(repo.get(rogue.id()).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_sorts_by_name() {
        let repo = InMemoryCharacterRepo::new();
        repo.save(&character("Zed")).await.unwrap();
        repo.save(&character("Ada")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all[0].name(), "Ada");
        assert_eq!(all[1].name(), "Zed");
    }
}
