//! Character use cases.
//!
//! Every command reads the current character from the in-memory view, runs
//! the domain operator, publishes the result to the view, and then persists
//! it. A failed save is logged and handed back as a [`Notice`]; the view
//! keeps the new value.

mod error;

pub use error::ServiceError;

use std::sync::Arc;

use charsmith_domain::game_systems::{self, ImprovementRequest};
use charsmith_domain::{
    Character, CharacterId, CreationInput, HpMethod, PendingChoice, RuleLookup,
};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::infrastructure::export::{export_characters, import_characters};
use crate::infrastructure::ports::{CharacterRepo, RandomPort};

/// Non-blocking problem reported alongside a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The view was updated but storage was not.
    PersistenceFailed {
        character_id: CharacterId,
        error: String,
    },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::PersistenceFailed {
                character_id,
                error,
            } => format!("Could not save character {character_id}: {error}"),
        }
    }
}

/// Result of a character command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub character: Character,
    /// Outcome text for the player, if the operator produced one.
    pub message: Option<String>,
    pub notice: Option<Notice>,
}

/// Result of a bulk import.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub characters: Vec<Character>,
    pub notices: Vec<Notice>,
}

/// Owns the in-memory character view and the publish-then-persist sequence.
pub struct CharacterService {
    view: DashMap<CharacterId, Character>,
    pending: DashMap<CharacterId, Vec<PendingChoice>>,
    rules: Arc<dyn RuleLookup>,
    repo: Arc<dyn CharacterRepo>,
    random: Arc<dyn RandomPort>,
}

impl CharacterService {
    pub fn new(
        rules: Arc<dyn RuleLookup>,
        repo: Arc<dyn CharacterRepo>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            view: DashMap::new(),
            pending: DashMap::new(),
            rules,
            repo,
            random,
        }
    }

    /// Hydrate the view from storage. Returns how many characters were loaded.
    pub async fn load_all(&self) -> Result<usize, ServiceError> {
        let characters = self.repo.list().await?;
        let count = characters.len();
        for character in characters {
            self.view.insert(character.id(), character);
        }
        info!(count, "Loaded characters");
        Ok(count)
    }

    pub fn get(&self, id: CharacterId) -> Result<Character, ServiceError> {
        self.view
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(ServiceError::NotFound(id))
    }

    /// All characters in the view, ordered by name.
    pub fn list(&self) -> Vec<Character> {
        let mut all: Vec<Character> = self
            .view
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        all
    }

    /// Choices opened by the most recent level-up that are still unresolved.
    pub fn pending_choices(&self, id: CharacterId) -> Vec<PendingChoice> {
        self.pending
            .get(&id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub async fn create(&self, mut input: CreationInput) -> Result<CommandResult, ServiceError> {
        if input.hp_method == HpMethod::Rolled && input.rolled_hp.is_none() {
            let rolled = game_systems::roll_hit_points(
                self.rules.as_ref(),
                &input.class,
                input.edition,
                |count, sides| self.random.roll_dice(count, sides),
            )?;
            input.rolled_hp = Some(rolled);
        }

        let character = game_systems::derive(&input, self.rules.as_ref())?;
        info!(
            character_id = %character.id(),
            class = %character.class_slug(),
            level = character.level(),
            "Created character"
        );
        let message = format!("Created {}", character.name());
        let notice = self.publish(character.clone()).await;
        Ok(CommandResult {
            character,
            message: Some(message),
            notice,
        })
    }

    pub async fn level_up(&self, id: CharacterId) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::level_up(&current, self.rules.as_ref())?;
        if character != current {
            // The previous level-up's choices are superseded.
            self.pending.insert(id, outcome.pending().to_vec());
            debug!(character_id = %id, pending = outcome.pending().len(), "Replaced pending choices");
        }

        let mut message = outcome.message();
        for choice in outcome.pending() {
            message.push('\n');
            message.push_str(&choice.message());
        }
        self.commit(current, character, Some(message)).await
    }

    pub async fn level_down(&self, id: CharacterId) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::level_down(&current, self.rules.as_ref())?;
        let level = character.level();
        if let Some(mut pending) = self.pending.get_mut(&id) {
            pending.retain(|choice| choice.level() <= level);
        }
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn choose_cantrip(
        &self,
        id: CharacterId,
        level: u8,
        slug: &str,
    ) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let character = game_systems::choose_cantrip(&current, self.rules.as_ref(), level, slug)?;
        self.resolve(id, |choice| match choice {
            PendingChoice::Cantrip { level: l, count } if *l == level => {
                *count = count.saturating_sub(1);
                *count > 0
            }
            _ => true,
        });
        self.commit(current, character, Some(format!("Learned {slug}")))
            .await
    }

    pub async fn choose_subclass(
        &self,
        id: CharacterId,
        slug: &str,
    ) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let character = game_systems::choose_subclass(&current, self.rules.as_ref(), slug)?;
        self.resolve(id, |choice| !matches!(choice, PendingChoice::Subclass { .. }));
        let message = format!(
            "Chose subclass {}",
            character.subclass().unwrap_or(slug)
        );
        self.commit(current, character, Some(message)).await
    }

    pub async fn improve(
        &self,
        id: CharacterId,
        level: u8,
        request: ImprovementRequest,
    ) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let character = game_systems::apply_ability_score_improvement(
            &current,
            self.rules.as_ref(),
            level,
            request,
        )?;
        self.resolve(id, |choice| {
            !matches!(choice, PendingChoice::AbilityScoreImprovement { level: l } if *l == level)
        });
        self.commit(
            current,
            character,
            Some(format!("Applied level {level} improvement")),
        )
        .await
    }

    pub async fn short_rest(&self, id: CharacterId, dice: u32) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::short_rest(&current, dice, |count, sides| {
            self.random.roll_dice(count, sides)
        })?;
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn long_rest(&self, id: CharacterId) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::long_rest(&current);
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn equip(&self, id: CharacterId, slug: &str) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::equip(&current, self.rules.as_ref(), slug);
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn unequip(&self, id: CharacterId, slug: &str) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::unequip(&current, self.rules.as_ref(), slug);
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn add_item(
        &self,
        id: CharacterId,
        slug: &str,
        quantity: u32,
    ) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) =
            game_systems::add_item(&current, self.rules.as_ref(), slug, quantity);
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn remove_item(
        &self,
        id: CharacterId,
        slug: &str,
        quantity: u32,
    ) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) =
            game_systems::remove_item(&current, self.rules.as_ref(), slug, quantity);
        self.commit(current, character, Some(outcome.message())).await
    }

    pub async fn use_spell_slot(
        &self,
        id: CharacterId,
        slot_level: u8,
    ) -> Result<CommandResult, ServiceError> {
        let current = self.get(id)?;
        let (character, outcome) = game_systems::use_spell_slot(&current, slot_level);
        self.commit(current, character, Some(outcome.message())).await
    }

    /// Remove a character from the view and from storage.
    pub async fn delete(&self, id: CharacterId) -> Result<Option<Notice>, ServiceError> {
        if self.view.remove(&id).is_none() {
            return Err(ServiceError::NotFound(id));
        }
        self.pending.remove(&id);
        info!(character_id = %id, "Deleted character");

        match self.repo.delete(id).await {
            Ok(()) => Ok(None),
            Err(e) => {
                warn!(character_id = %id, error = %e, "Failed to delete stored character");
                Ok(Some(Notice::PersistenceFailed {
                    character_id: id,
                    error: e.to_string(),
                }))
            }
        }
    }

    /// Export every character in the view as a JSON array.
    pub fn export(&self) -> Result<String, ServiceError> {
        Ok(export_characters(&self.list())?)
    }

    /// Import an exported array; each character gets a fresh id and is persisted.
    pub async fn import(&self, json: &str) -> Result<ImportResult, ServiceError> {
        let characters = import_characters(json)?;
        let mut result = ImportResult::default();
        for character in characters {
            if let Some(notice) = self.publish(character.clone()).await {
                result.notices.push(notice);
            }
            result.characters.push(character);
        }
        info!(count = result.characters.len(), "Imported characters");
        Ok(result)
    }

    /// Drop resolved entries from a character's pending choices.
    fn resolve<F>(&self, id: CharacterId, keep: F)
    where
        F: FnMut(&mut PendingChoice) -> bool,
    {
        if let Some(mut pending) = self.pending.get_mut(&id) {
            pending.retain_mut(keep);
        }
    }

    /// Publish and persist `next` unless the operator left the character unchanged.
    async fn commit(
        &self,
        current: Character,
        next: Character,
        message: Option<String>,
    ) -> Result<CommandResult, ServiceError> {
        let notice = if next == current {
            None
        } else {
            self.publish(next.clone()).await
        };
        Ok(CommandResult {
            character: next,
            message,
            notice,
        })
    }

    async fn publish(&self, character: Character) -> Option<Notice> {
        let id = character.id();
        self.view.insert(id, character.clone());

        match self.repo.save(&character).await {
            Ok(()) => {
                debug!(character_id = %id, level = character.level(), "Saved character");
                None
            }
            Err(e) => {
                warn!(character_id = %id, error = %e, "Failed to save character, keeping in-memory value");
                Some(Notice::PersistenceFailed {
                    character_id: id,
                    error: e.to_string(),
                })
            }
        }
    }
}
