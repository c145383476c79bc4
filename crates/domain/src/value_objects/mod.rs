//! Value objects - Immutable objects defined by their attributes

mod ability;
mod creation_input;
mod edition;
mod hit_points;
mod inventory;
mod skill;

pub use ability::{
    ability_modifier, Ability, AbilityScore, AbilityScores, ABILITY_SCORE_CAP,
    DEFAULT_ABILITY_SCORE,
};
pub use creation_input::{AbilityMethod, CreationInput, EquipmentChoiceSelection, SpellSelection};
pub use edition::Edition;
pub use hit_points::{average_hit_points_per_level, HitDice, HpMethod};
pub use inventory::{InventoryItem, ItemGrant};
pub(crate) use inventory::merge_item;
pub use skill::{SavingThrow, Skill, SkillEntry, SkillOverlay};
