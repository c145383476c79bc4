//! Rule records: the static data a rule set provides for each slug.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{SpellcastingType, SPELL_LEVELS};
use crate::value_objects::{Ability, ItemGrant, Skill, SkillOverlay};

/// A feature gained at a class (or subclass) level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGrant {
    pub level: u8,
    pub name: String,
}

impl FeatureGrant {
    pub fn new(level: u8, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }
}

/// A race/species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub ability_bonuses: BTreeMap<Ability, i32>,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub proficiencies: Vec<String>,
    #[serde(default = "default_speed")]
    pub speed: u32,
    /// Extra hit points per character level (e.g. dwarven toughness)
    #[serde(default)]
    pub hp_bonus_per_level: i32,
    #[serde(default)]
    pub variants: Vec<RaceVariant>,
    #[serde(default)]
    pub lineages: Vec<Lineage>,
}

fn default_speed() -> u32 {
    30
}

impl RaceRecord {
    pub fn variant(&self, slug: &str) -> Option<&RaceVariant> {
        self.variants.iter().find(|v| v.slug == slug)
    }

    pub fn lineage(&self, slug: &str) -> Option<&Lineage> {
        self.lineages.iter().find(|l| l.slug == slug)
    }
}

/// A race variant; its ability bonuses replace the base race's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceVariant {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub ability_bonuses: BTreeMap<Ability, i32>,
    #[serde(default)]
    pub traits: Vec<String>,
}

/// A lineage adds traits on top of the base race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineage {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub traits: Vec<String>,
}

/// A subclass and the features it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubclassRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub features: Vec<FeatureGrant>,
}

/// Fixed starting equipment for characters created at `min_level` or above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPackage {
    pub min_level: u8,
    pub items: Vec<ItemGrant>,
}

/// A class equipment choice offered by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentChoice {
    pub id: String,
    pub options: Vec<Vec<ItemGrant>>,
}

/// A selectable class feature option, such as a divine order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureOption {
    pub slug: String,
    pub name: String,
    /// Options in the same group are mutually exclusive
    pub group: String,
    #[serde(default)]
    pub skill_overlay: Option<SkillOverlay>,
}

/// Spellcasting tables for a class, indexed by class level - 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSpellcasting {
    pub ability: Ability,
    pub spellcasting_type: SpellcastingType,
    pub slots: Vec<[u8; SPELL_LEVELS]>,
    pub cantrips_known: Vec<u8>,
    #[serde(default)]
    pub spells_known: Option<Vec<u8>>,
    /// Class level is divided by this when counting prepared spells
    #[serde(default = "default_divisor")]
    pub prepared_level_divisor: u8,
}

fn default_divisor() -> u8 {
    1
}

impl ClassSpellcasting {
    pub fn slots_at(&self, level: u8) -> [u8; SPELL_LEVELS] {
        table_row(&self.slots, level).unwrap_or([0; SPELL_LEVELS])
    }

    pub fn cantrips_at(&self, level: u8) -> u8 {
        table_row(&self.cantrips_known, level).unwrap_or(0)
    }

    pub fn spells_known_at(&self, level: u8) -> Option<u8> {
        self.spells_known
            .as_ref()
            .map(|table| table_row(table, level).unwrap_or(0))
    }

    /// Prepared spell limit: max(1, level / divisor + modifier).
    pub fn max_prepared(&self, level: u8, modifier: i32) -> usize {
        let divisor = i32::from(self.prepared_level_divisor.max(1));
        let count = (i32::from(level) / divisor + modifier).max(1);
        usize::try_from(count).unwrap_or(1)
    }
}

fn table_row<T: Copy>(table: &[T], level: u8) -> Option<T> {
    usize::from(level)
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
}

/// A class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub slug: String,
    pub name: String,
    pub hit_die: u8,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    /// Armor, weapon, and tool proficiencies
    #[serde(default)]
    pub proficiencies: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub num_skill_choices: u8,
    #[serde(default)]
    pub skill_proficiencies: Vec<Skill>,
    #[serde(default)]
    pub features: Vec<FeatureGrant>,
    #[serde(default)]
    pub asi_levels: Vec<u8>,
    /// Level at which the subclass is chosen
    #[serde(default = "default_subclass_level")]
    pub subclass_level: u8,
    #[serde(default)]
    pub subclasses: Vec<SubclassRecord>,
    #[serde(default)]
    pub equipment_packages: Vec<EquipmentPackage>,
    #[serde(default)]
    pub equipment_choices: Vec<EquipmentChoice>,
    #[serde(default)]
    pub feature_options: Vec<FeatureOption>,
    #[serde(default)]
    pub spellcasting: Option<ClassSpellcasting>,
}

fn default_subclass_level() -> u8 {
    3
}

impl ClassRecord {
    pub fn subclass(&self, slug: &str) -> Option<&SubclassRecord> {
        self.subclasses.iter().find(|s| s.slug == slug)
    }

    pub fn feature_option(&self, slug: &str) -> Option<&FeatureOption> {
        self.feature_options.iter().find(|o| o.slug == slug)
    }

    /// The package for the highest `min_level` not above `level`.
    pub fn equipment_package(&self, level: u8) -> Option<&EquipmentPackage> {
        self.equipment_packages
            .iter()
            .filter(|p| p.min_level <= level)
            .max_by_key(|p| p.min_level)
    }

    pub fn is_asi_level(&self, level: u8) -> bool {
        self.asi_levels.contains(&level)
    }

    pub fn spell_slots(&self, level: u8) -> [u8; SPELL_LEVELS] {
        self.spellcasting
            .as_ref()
            .map(|sc| sc.slots_at(level))
            .unwrap_or([0; SPELL_LEVELS])
    }

    pub fn cantrips_known(&self, level: u8) -> u8 {
        self.spellcasting
            .as_ref()
            .map(|sc| sc.cantrips_at(level))
            .unwrap_or(0)
    }

    /// Whether the class casts spells at all at `level`.
    pub fn casts_at(&self, level: u8) -> bool {
        self.spell_slots(level).iter().any(|&n| n > 0) || self.cantrips_known(level) > 0
    }
}

/// A background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub skill_proficiencies: Vec<Skill>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<ItemGrant>,
    #[serde(default)]
    pub feature: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorCategory {
    Light,
    Medium,
    Heavy,
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    Simple,
    Martial,
}

/// Armor class numbers of an armor item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorClassSpec {
    pub base: i32,
    #[serde(default)]
    pub dex_bonus: bool,
    #[serde(default)]
    pub max_bonus: Option<i32>,
}

/// An equipment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub armor_category: Option<ArmorCategory>,
    #[serde(default)]
    pub armor_class: Option<ArmorClassSpec>,
    #[serde(default)]
    pub weapon_category: Option<WeaponCategory>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub weight: f32,
}

impl EquipmentRecord {
    /// Body armor: occupies the single armor slot.
    pub fn is_body_armor(&self) -> bool {
        matches!(
            self.armor_category,
            Some(ArmorCategory::Light | ArmorCategory::Medium | ArmorCategory::Heavy)
        )
    }

    pub fn is_shield(&self) -> bool {
        self.armor_category == Some(ArmorCategory::Shield)
    }

    /// Occupies one of the two weapon slots; shields count here too.
    pub fn uses_weapon_slot(&self) -> bool {
        self.weapon_category.is_some() || self.is_shield()
    }
}

/// A spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRecord {
    pub slug: String,
    pub name: String,
    /// 0 for cantrips
    pub level: u8,
    pub school: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

/// A feat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub ability_increases: BTreeMap<Ability, i32>,
    #[serde(default)]
    pub description: String,
}
