//! Character operator outcomes
//!
//! Each operator returns one of these alongside the new character value so
//! the caller can tell a real change from a boundary no-op and show the
//! player a message.

use serde::{Deserialize, Serialize};

/// A choice opened by a level-up that the player must resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PendingChoice {
    /// Ability score improvement or feat
    #[serde(rename = "asi")]
    AbilityScoreImprovement { level: u8 },
    /// `count` more cantrips may be learned
    Cantrip { level: u8, count: u8 },
    Subclass { level: u8 },
}

impl PendingChoice {
    pub fn level(&self) -> u8 {
        match self {
            PendingChoice::AbilityScoreImprovement { level }
            | PendingChoice::Cantrip { level, .. }
            | PendingChoice::Subclass { level } => *level,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PendingChoice::AbilityScoreImprovement { level } => {
                format!("Level {level}: choose an ability score improvement or a feat")
            }
            PendingChoice::Cantrip { level, count } => {
                format!("Level {level}: choose {count} new cantrip(s)")
            }
            PendingChoice::Subclass { level } => format!("Level {level}: choose a subclass"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelUpOutcome {
    LeveledUp {
        new_level: u8,
        hit_points_gained: i32,
        pending: Vec<PendingChoice>,
    },
    /// Already level 20, nothing changed
    AtMaxLevel,
}

impl LevelUpOutcome {
    pub fn pending(&self) -> &[PendingChoice] {
        match self {
            LevelUpOutcome::LeveledUp { pending, .. } => pending,
            LevelUpOutcome::AtMaxLevel => &[],
        }
    }

    pub fn message(&self) -> String {
        match self {
            LevelUpOutcome::LeveledUp {
                new_level,
                hit_points_gained,
                ..
            } => format!("Reached level {new_level} (+{hit_points_gained} HP)"),
            LevelUpOutcome::AtMaxLevel => "Already at maximum level".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDownOutcome {
    LeveledDown {
        new_level: u8,
        hit_points_lost: i32,
        removed_cantrips: Vec<String>,
        reverted_improvement: bool,
    },
    /// Already level 1, nothing changed
    AtMinLevel,
}

impl LevelDownOutcome {
    pub fn message(&self) -> String {
        match self {
            LevelDownOutcome::LeveledDown {
                new_level,
                hit_points_lost,
                ..
            } => format!("Returned to level {new_level} (-{hit_points_lost} max HP)"),
            LevelDownOutcome::AtMinLevel => "Already at minimum level".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipOutcome {
    ArmorEquipped {
        slug: String,
        /// Previously worn armor, now unequipped
        replaced: Option<String>,
    },
    WeaponEquipped { slug: String },
    AlreadyEquipped,
    /// Both weapon slots are taken; nothing changed
    WeaponSlotsFull,
    NotInInventory,
    /// Not armor, a shield, or a weapon
    NotEquippable,
}

impl EquipOutcome {
    pub fn changed(&self) -> bool {
        matches!(
            self,
            EquipOutcome::ArmorEquipped { .. } | EquipOutcome::WeaponEquipped { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            EquipOutcome::ArmorEquipped {
                slug,
                replaced: Some(old),
            } => format!("Equipped {slug} (replacing {old})"),
            EquipOutcome::ArmorEquipped { slug, replaced: None } => format!("Equipped {slug}"),
            EquipOutcome::WeaponEquipped { slug } => format!("Equipped {slug}"),
            EquipOutcome::AlreadyEquipped => "Item is already equipped".to_string(),
            EquipOutcome::WeaponSlotsFull => {
                "Both weapon slots are in use; unequip one first".to_string()
            }
            EquipOutcome::NotInInventory => "Item is not in the inventory".to_string(),
            EquipOutcome::NotEquippable => "Item cannot be equipped".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnequipOutcome {
    Unequipped { slug: String },
    NotEquipped,
}

impl UnequipOutcome {
    pub fn message(&self) -> String {
        match self {
            UnequipOutcome::Unequipped { slug } => format!("Unequipped {slug}"),
            UnequipOutcome::NotEquipped => "Item is not equipped".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddItemOutcome {
    Added { slug: String, total: u32 },
    /// Quantity 0
    NothingToAdd,
    UnknownItem,
}

impl AddItemOutcome {
    pub fn message(&self) -> String {
        match self {
            AddItemOutcome::Added { slug, total } => format!("Now carrying {total} x {slug}"),
            AddItemOutcome::NothingToAdd => "Nothing to add".to_string(),
            AddItemOutcome::UnknownItem => "Unknown equipment".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveItemOutcome {
    Decremented { slug: String, remaining: u32 },
    /// The line is gone; it was force-unequipped if it was in use
    Removed { slug: String, was_equipped: bool },
    NothingToRemove,
    NotInInventory,
}

impl RemoveItemOutcome {
    pub fn message(&self) -> String {
        match self {
            RemoveItemOutcome::Decremented { slug, remaining } => {
                format!("{remaining} x {slug} left")
            }
            RemoveItemOutcome::Removed { slug, .. } => format!("Removed {slug}"),
            RemoveItemOutcome::NothingToRemove => "Nothing to remove".to_string(),
            RemoveItemOutcome::NotInInventory => "Item is not in the inventory".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortRestOutcome {
    pub dice_spent: u32,
    pub rolls: Vec<u32>,
    pub hit_points_recovered: i32,
}

impl ShortRestOutcome {
    pub fn message(&self) -> String {
        format!(
            "Spent {} hit dice and recovered {} HP",
            self.dice_spent, self.hit_points_recovered
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRestOutcome {
    pub hit_points_restored: i32,
    pub hit_dice_restored: u32,
    pub slots_restored: u32,
}

impl LongRestOutcome {
    pub fn message(&self) -> String {
        format!(
            "Long rest: +{} HP, {} hit dice and {} spell slots restored",
            self.hit_points_restored, self.hit_dice_restored, self.slots_restored
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellSlotOutcome {
    Used { slot_level: u8, remaining: u8 },
    NoSlotsRemaining { slot_level: u8 },
    NotASpellcaster,
    /// Slot level outside 1-9
    InvalidSlotLevel { slot_level: u8 },
}

impl SpellSlotOutcome {
    pub fn message(&self) -> String {
        match self {
            SpellSlotOutcome::Used {
                slot_level,
                remaining,
            } => format!("Used a level {slot_level} slot ({remaining} left)"),
            SpellSlotOutcome::NoSlotsRemaining { slot_level } => {
                format!("No level {slot_level} slots remaining")
            }
            SpellSlotOutcome::NotASpellcaster => "Character cannot cast spells".to_string(),
            SpellSlotOutcome::InvalidSlotLevel { slot_level } => {
                format!("There are no level {slot_level} spell slots")
            }
        }
    }
}
