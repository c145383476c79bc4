//! Character operators
//!
//! Pure functions over [`crate::Character`]: derivation from creation
//! input, equipment changes, level progression, and rests. Each takes the
//! current value and returns a new one; rule data comes in through
//! [`crate::rules::RuleLookup`] and dice through a caller-supplied closure.

mod calculations;
mod derivation;
mod equipment;
mod progression;
mod rest;
mod spellcasting;

#[cfg(test)]
pub(crate) mod test_support;

pub use calculations::{armor_class, character_armor_class, MEDIUM_ARMOR_DEX_CAP, SHIELD_BONUS};
pub use derivation::{derive, roll_hit_points, COMMON_LANGUAGE};
pub use equipment::{add_item, equip, remove_item, unequip};
pub use progression::{
    apply_ability_score_improvement, choose_cantrip, choose_subclass, level_down, level_up,
    ImprovementRequest, ASI_POINTS,
};
pub use rest::{long_rest, short_rest, use_spell_slot};
