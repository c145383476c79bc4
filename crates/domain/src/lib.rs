//! Charsmith domain: character derivation and the rules that keep a
//! character consistent as it rests, levels, and changes equipment.
//!
//! Everything here is synchronous and free of I/O. Rule data is injected
//! through [`rules::RuleLookup`] and dice through a caller-supplied closure.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use aggregates::{Character, MAX_EQUIPPED_WEAPONS};

pub use entities::{
    AsiChoice, FeatureEntry, Personality, Spellcasting, SpellcastingType, SPELL_LEVELS,
};

pub use error::DomainError;

pub use events::{
    AddItemOutcome, EquipOutcome, LevelDownOutcome, LevelUpOutcome, LongRestOutcome,
    PendingChoice, RemoveItemOutcome, ShortRestOutcome, SpellSlotOutcome, UnequipOutcome,
};

pub use game_systems::ImprovementRequest;

pub use ids::CharacterId;

pub use rules::{RuleLookup, RuleSet, RuleSetData, RuleSetError, MAX_LEVEL};

pub use value_objects::{
    ability_modifier, Ability, AbilityMethod, AbilityScores, CreationInput,
    EquipmentChoiceSelection, Edition, HitDice, HpMethod, InventoryItem, ItemGrant, SavingThrow,
    Skill, SkillEntry, SkillOverlay, SpellSelection,
};
