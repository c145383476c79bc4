//! Character aggregate - the persisted, fully-derived character record
//!
//! # Design
//!
//! - **Crate-private fields**: only the operators in `game_systems` mutate a
//!   character, and each of them returns a new value
//! - **Derived fields**: armor class, skill values, saving throws, passive
//!   perception, and spell DC are recomputed from scratch by
//!   `game_systems::refresh_derived`, never set directly
//! - **Serde form is the interchange format**: export/import and storage use
//!   the camelCase JSON form of this struct

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{AsiChoice, FeatureEntry, Personality, Spellcasting};
use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::rules::MAX_LEVEL;
use crate::value_objects::{
    Ability, AbilityMethod, AbilityScores, Edition, HitDice, InventoryItem, SavingThrow, Skill,
    SkillEntry, SkillOverlay,
};

/// Maximum number of equipped weapon-slot items.
pub const MAX_EQUIPPED_WEAPONS: usize = 2;

/// A derived tabletop character.
///
/// # Invariants
///
/// - `1 <= level <= 20`
/// - `0 <= hit_points <= max_hit_points`
/// - `hit_dice.current <= hit_dice.max`
/// - an inventory line is `equipped` exactly when its slug is
///   `equipped_armor` or one of `equipped_weapons`
/// - `equipped_weapons.len() <= 2`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    // Identity
    pub(crate) id: CharacterId,
    pub(crate) name: String,
    pub(crate) race: String,
    pub(crate) race_slug: String,
    #[serde(default)]
    pub(crate) variant: Option<String>,
    #[serde(default)]
    pub(crate) lineage: Option<String>,
    pub(crate) class_name: String,
    pub(crate) class_slug: String,
    #[serde(default)]
    pub(crate) subclass: Option<String>,
    #[serde(default)]
    pub(crate) subclass_slug: Option<String>,
    pub(crate) level: u8,
    #[serde(default)]
    pub(crate) alignment: String,
    #[serde(default)]
    pub(crate) background: Option<String>,
    #[serde(default)]
    pub(crate) edition: Edition,

    // Abilities and skills
    #[serde(default)]
    pub(crate) ability_method: AbilityMethod,
    pub(crate) abilities: AbilityScores,
    pub(crate) skills: BTreeMap<Skill, SkillEntry>,
    #[serde(default)]
    pub(crate) skill_overlays: Vec<SkillOverlay>,
    pub(crate) saving_throws: BTreeMap<Ability, SavingThrow>,
    pub(crate) passive_perception: i32,
    pub(crate) proficiency_bonus: i32,

    // Combat
    pub(crate) armor_class: i32,
    pub(crate) hit_points: i32,
    pub(crate) max_hit_points: i32,
    pub(crate) hit_dice: HitDice,
    /// Racial hit point bonus applied once per level
    #[serde(default)]
    pub(crate) hp_bonus_per_level: i32,
    pub(crate) speed: u32,

    // Equipment
    #[serde(default)]
    pub(crate) inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub(crate) equipped_armor: Option<String>,
    #[serde(default)]
    pub(crate) equipped_weapons: Vec<String>,

    // Magic and features
    #[serde(default)]
    pub(crate) spellcasting: Option<Spellcasting>,
    #[serde(default)]
    pub(crate) features: Vec<FeatureEntry>,
    #[serde(default)]
    pub(crate) proficiencies: Vec<String>,
    #[serde(default)]
    pub(crate) languages: Vec<String>,

    // Progression bookkeeping
    #[serde(default)]
    pub(crate) selected_feats: Vec<String>,
    #[serde(default)]
    pub(crate) fighting_style: Option<String>,
    #[serde(default)]
    pub(crate) feature_options: Vec<String>,
    #[serde(default)]
    pub(crate) asi_choices: BTreeMap<u8, AsiChoice>,
    #[serde(default)]
    pub(crate) cantrip_choices_by_level: BTreeMap<u8, Vec<String>>,

    #[serde(default)]
    pub(crate) personality: Personality,
}

impl Character {
    // =========================================================================
    // Identity Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Race display name.
    #[inline]
    pub fn race(&self) -> &str {
        &self.race
    }

    #[inline]
    pub fn race_slug(&self) -> &str {
        &self.race_slug
    }

    #[inline]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    #[inline]
    pub fn lineage(&self) -> Option<&str> {
        self.lineage.as_deref()
    }

    /// Class display name.
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline]
    pub fn class_slug(&self) -> &str {
        &self.class_slug
    }

    #[inline]
    pub fn subclass(&self) -> Option<&str> {
        self.subclass.as_deref()
    }

    #[inline]
    pub fn subclass_slug(&self) -> Option<&str> {
        self.subclass_slug.as_deref()
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn alignment(&self) -> &str {
        &self.alignment
    }

    #[inline]
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    #[inline]
    pub fn edition(&self) -> Edition {
        self.edition
    }

    // =========================================================================
    // Abilities and Skills
    // =========================================================================

    #[inline]
    pub fn ability_method(&self) -> AbilityMethod {
        self.ability_method
    }

    #[inline]
    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    #[inline]
    pub fn skills(&self) -> &BTreeMap<Skill, SkillEntry> {
        &self.skills
    }

    pub fn skill(&self, skill: Skill) -> SkillEntry {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    #[inline]
    pub fn skill_overlays(&self) -> &[SkillOverlay] {
        &self.skill_overlays
    }

    #[inline]
    pub fn saving_throws(&self) -> &BTreeMap<Ability, SavingThrow> {
        &self.saving_throws
    }

    #[inline]
    pub fn passive_perception(&self) -> i32 {
        self.passive_perception
    }

    #[inline]
    pub fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
    }

    // =========================================================================
    // Combat
    // =========================================================================

    #[inline]
    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    #[inline]
    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    #[inline]
    pub fn max_hit_points(&self) -> i32 {
        self.max_hit_points
    }

    #[inline]
    pub fn hit_dice(&self) -> HitDice {
        self.hit_dice
    }

    #[inline]
    pub fn hp_bonus_per_level(&self) -> i32 {
        self.hp_bonus_per_level
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    // =========================================================================
    // Equipment
    // =========================================================================

    #[inline]
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn inventory_item(&self, slug: &str) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.equipment_slug() == slug)
    }

    #[inline]
    pub fn equipped_armor(&self) -> Option<&str> {
        self.equipped_armor.as_deref()
    }

    #[inline]
    pub fn equipped_weapons(&self) -> &[String] {
        &self.equipped_weapons
    }

    /// Whether `slug` occupies the armor slot or a weapon slot.
    pub fn is_equipped(&self, slug: &str) -> bool {
        self.equipped_armor.as_deref() == Some(slug)
            || self.equipped_weapons.iter().any(|w| w == slug)
    }

    // =========================================================================
    // Magic, Features, Bookkeeping
    // =========================================================================

    #[inline]
    pub fn spellcasting(&self) -> Option<&Spellcasting> {
        self.spellcasting.as_ref()
    }

    #[inline]
    pub fn features(&self) -> &[FeatureEntry] {
        &self.features
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name() == name)
    }

    #[inline]
    pub fn proficiencies(&self) -> &[String] {
        &self.proficiencies
    }

    #[inline]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[inline]
    pub fn selected_feats(&self) -> &[String] {
        &self.selected_feats
    }

    #[inline]
    pub fn fighting_style(&self) -> Option<&str> {
        self.fighting_style.as_deref()
    }

    #[inline]
    pub fn feature_options(&self) -> &[String] {
        &self.feature_options
    }

    #[inline]
    pub fn asi_choices(&self) -> &BTreeMap<u8, AsiChoice> {
        &self.asi_choices
    }

    #[inline]
    pub fn cantrip_choices_by_level(&self) -> &BTreeMap<u8, Vec<String>> {
        &self.cantrip_choices_by_level
    }

    #[inline]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check the invariants listed on [`Character`] plus spell slot bounds.
    ///
    /// Operators keep these by construction; records arriving from storage
    /// or an import file are checked before use.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(1..=MAX_LEVEL).contains(&self.level) {
            return Err(DomainError::validation(format!(
                "level {} is outside 1..={}",
                self.level, MAX_LEVEL
            )));
        }
        if self.max_hit_points < 1 || !(0..=self.max_hit_points).contains(&self.hit_points) {
            return Err(DomainError::validation(format!(
                "hit points {}/{} are out of range",
                self.hit_points, self.max_hit_points
            )));
        }
        if self.hit_dice.current() > self.hit_dice.max() {
            return Err(DomainError::validation(format!(
                "hit dice {}/{} are out of range",
                self.hit_dice.current(),
                self.hit_dice.max()
            )));
        }
        if self.equipped_weapons.len() > MAX_EQUIPPED_WEAPONS {
            return Err(DomainError::validation(format!(
                "{} weapons equipped, at most {} allowed",
                self.equipped_weapons.len(),
                MAX_EQUIPPED_WEAPONS
            )));
        }
        for item in &self.inventory {
            if item.equipped() != self.is_equipped(item.equipment_slug()) {
                return Err(DomainError::validation(format!(
                    "equipped flag on '{}' disagrees with the equipment slots",
                    item.equipment_slug()
                )));
            }
        }
        let equipped = self
            .equipped_armor
            .iter()
            .chain(&self.equipped_weapons);
        for slug in equipped {
            if self.inventory_item(slug).is_none() {
                return Err(DomainError::validation(format!(
                    "equipped item '{slug}' is not in the inventory"
                )));
            }
        }
        if let Some(spellcasting) = &self.spellcasting {
            let slots = spellcasting.spell_slots().iter();
            for (i, (used, max)) in spellcasting.used_spell_slots().iter().zip(slots).enumerate() {
                if used > max {
                    return Err(DomainError::validation(format!(
                        "{used} level-{} slots used of {max}",
                        i + 1
                    )));
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Builder-style Methods
    // =========================================================================

    /// Give the character a new identity, e.g. on import.
    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }
}
