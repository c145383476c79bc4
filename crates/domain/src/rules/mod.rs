//! Rule lookup tables.
//!
//! Every engine call takes a `&dyn RuleLookup` instead of reading global
//! data, so tests can run against small fixture rule sets.

mod records;
mod srd;
pub(crate) mod tables;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::SPELL_LEVELS;
use crate::value_objects::Edition;

pub use records::{
    ArmorCategory, ArmorClassSpec, BackgroundRecord, ClassRecord, ClassSpellcasting,
    EquipmentChoice, EquipmentPackage, EquipmentRecord, FeatRecord, FeatureGrant, FeatureOption,
    Lineage, RaceRecord, RaceVariant, SpellRecord, SubclassRecord, WeaponCategory,
};
pub use tables::MAX_LEVEL;

/// Fallback when a level falls outside the proficiency table.
pub const DEFAULT_PROFICIENCY_BONUS: i32 = 2;

/// Read-only access to the static rule data.
pub trait RuleLookup: Send + Sync {
    fn race(&self, slug: &str) -> Option<&RaceRecord>;

    /// Class record for an edition; edition-specific overrides win.
    fn class(&self, slug: &str, edition: Edition) -> Option<&ClassRecord>;

    fn background(&self, slug: &str) -> Option<&BackgroundRecord>;

    fn equipment(&self, slug: &str) -> Option<&EquipmentRecord>;

    fn spell(&self, slug: &str) -> Option<&SpellRecord>;

    fn feat(&self, slug: &str) -> Option<&FeatRecord>;

    fn proficiency_bonus(&self, level: u8) -> Option<i32>;

    fn spell_slots(&self, class: &str, edition: Edition, level: u8) -> [u8; SPELL_LEVELS] {
        self.class(class, edition)
            .map(|c| c.spell_slots(level))
            .unwrap_or([0; SPELL_LEVELS])
    }

    fn cantrips_known(&self, class: &str, edition: Edition, level: u8) -> u8 {
        self.class(class, edition)
            .map(|c| c.cantrips_known(level))
            .unwrap_or(0)
    }

    fn spells_known(&self, class: &str, edition: Edition, level: u8) -> Option<u8> {
        self.class(class, edition)
            .and_then(|c| c.spellcasting.as_ref())
            .and_then(|sc| sc.spells_known_at(level))
    }

    /// Proficiency bonus with the documented fallback for out-of-table levels.
    fn proficiency_bonus_or_default(&self, level: u8) -> i32 {
        self.proficiency_bonus(level)
            .unwrap_or(DEFAULT_PROFICIENCY_BONUS)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("Invalid rule set JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate {kind} slug: {slug}")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("Proficiency bonus table must cover {expected} levels, found {found}")]
    ProficiencyTable { expected: usize, found: usize },

    #[error("Class '{class}' has a {table} table with {found} rows, expected {expected}")]
    ClassTable {
        class: String,
        table: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A class record that replaces the base record for one edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOverride {
    pub edition: Edition,
    pub class: ClassRecord,
}

/// Serialized form of a rule set: plain arrays of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSetData {
    pub races: Vec<RaceRecord>,
    pub classes: Vec<ClassRecord>,
    pub class_overrides: Vec<ClassOverride>,
    pub backgrounds: Vec<BackgroundRecord>,
    pub equipment: Vec<EquipmentRecord>,
    pub spells: Vec<SpellRecord>,
    pub feats: Vec<FeatRecord>,
    pub proficiency_bonus_by_level: Vec<i32>,
}

/// Immutable, slug-indexed rule data.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    races: HashMap<String, RaceRecord>,
    classes: HashMap<String, ClassRecord>,
    class_overrides: HashMap<(Edition, String), ClassRecord>,
    backgrounds: HashMap<String, BackgroundRecord>,
    equipment: HashMap<String, EquipmentRecord>,
    spells: HashMap<String, SpellRecord>,
    feats: HashMap<String, FeatRecord>,
    proficiency_bonus_by_level: Vec<i32>,
}

fn index<T>(
    kind: &'static str,
    records: Vec<T>,
    slug: impl Fn(&T) -> &str,
) -> Result<HashMap<String, T>, RuleSetError> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let key = slug(&record).to_string();
        if map.contains_key(&key) {
            return Err(RuleSetError::DuplicateSlug { kind, slug: key });
        }
        map.insert(key, record);
    }
    Ok(map)
}

fn validate_class(class: &ClassRecord) -> Result<(), RuleSetError> {
    let Some(sc) = &class.spellcasting else {
        return Ok(());
    };
    let expected = usize::from(MAX_LEVEL);
    let mut tables = vec![("slot", sc.slots.len()), ("cantrip", sc.cantrips_known.len())];
    if let Some(known) = &sc.spells_known {
        tables.push(("spells known", known.len()));
    }
    for (table, found) in tables {
        if found != expected {
            return Err(RuleSetError::ClassTable {
                class: class.slug.clone(),
                table,
                expected,
                found,
            });
        }
    }
    Ok(())
}

impl RuleSet {
    /// Index and validate rule data.
    pub fn from_data(data: RuleSetData) -> Result<Self, RuleSetError> {
        let expected = usize::from(MAX_LEVEL);
        if data.proficiency_bonus_by_level.len() != expected {
            return Err(RuleSetError::ProficiencyTable {
                expected,
                found: data.proficiency_bonus_by_level.len(),
            });
        }
        for class in data
            .classes
            .iter()
            .chain(data.class_overrides.iter().map(|o| &o.class))
        {
            validate_class(class)?;
        }

        let mut class_overrides = HashMap::new();
        for ClassOverride { edition, class } in data.class_overrides {
            let key = (edition, class.slug.clone());
            if class_overrides.contains_key(&key) {
                return Err(RuleSetError::DuplicateSlug {
                    kind: "class override",
                    slug: key.1,
                });
            }
            class_overrides.insert(key, class);
        }

        Ok(Self {
            races: index("race", data.races, |r| &r.slug)?,
            classes: index("class", data.classes, |c| &c.slug)?,
            class_overrides,
            backgrounds: index("background", data.backgrounds, |b| &b.slug)?,
            equipment: index("equipment", data.equipment, |e| &e.slug)?,
            spells: index("spell", data.spells, |s| &s.slug)?,
            feats: index("feat", data.feats, |f| &f.slug)?,
            proficiency_bonus_by_level: data.proficiency_bonus_by_level,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, RuleSetError> {
        let data: RuleSetData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// The built-in SRD subset.
    pub fn srd() -> Self {
        Self::from_trusted(srd::srd_data())
    }

    /// Index data known to be valid, keeping the last record on a clash.
    fn from_trusted(data: RuleSetData) -> Self {
        fn keyed<T>(records: Vec<T>, slug: impl Fn(&T) -> &str) -> HashMap<String, T> {
            records
                .into_iter()
                .map(|r| (slug(&r).to_string(), r))
                .collect()
        }

        Self {
            races: keyed(data.races, |r| &r.slug),
            classes: keyed(data.classes, |c| &c.slug),
            class_overrides: data
                .class_overrides
                .into_iter()
                .map(|o| ((o.edition, o.class.slug.clone()), o.class))
                .collect(),
            backgrounds: keyed(data.backgrounds, |b| &b.slug),
            equipment: keyed(data.equipment, |e| &e.slug),
            spells: keyed(data.spells, |s| &s.slug),
            feats: keyed(data.feats, |f| &f.slug),
            proficiency_bonus_by_level: data.proficiency_bonus_by_level,
        }
    }

    pub fn class_slugs(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn race_slugs(&self) -> impl Iterator<Item = &str> {
        self.races.keys().map(String::as_str)
    }
}

impl RuleLookup for RuleSet {
    fn race(&self, slug: &str) -> Option<&RaceRecord> {
        self.races.get(slug)
    }

    fn class(&self, slug: &str, edition: Edition) -> Option<&ClassRecord> {
        self.class_overrides
            .get(&(edition, slug.to_string()))
            .or_else(|| self.classes.get(slug))
    }

    fn background(&self, slug: &str) -> Option<&BackgroundRecord> {
        self.backgrounds.get(slug)
    }

    fn equipment(&self, slug: &str) -> Option<&EquipmentRecord> {
        self.equipment.get(slug)
    }

    fn spell(&self, slug: &str) -> Option<&SpellRecord> {
        self.spells.get(slug)
    }

    fn feat(&self, slug: &str) -> Option<&FeatRecord> {
        self.feats.get(slug)
    }

    fn proficiency_bonus(&self, level: u8) -> Option<i32> {
        usize::from(level)
            .checked_sub(1)
            .and_then(|i| self.proficiency_bonus_by_level.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> String {
        let table: Vec<String> = tables::proficiency_bonus_table()
            .iter()
            .map(i32::to_string)
            .collect();
        format!(
            r#"{{
                "races": [{{"slug": "human", "name": "Human"}}],
                "classes": [{{"slug": "fighter", "name": "Fighter", "hitDie": 10}}],
                "proficiencyBonusByLevel": [{}]
            }}"#,
            table.join(",")
        )
    }

    #[test]
    fn loads_minimal_rule_set() {
        let rules = RuleSet::from_json_str(&minimal_json()).unwrap();

        assert_eq!(rules.race("human").map(|r| r.speed), Some(30));
        assert_eq!(
            rules.class("fighter", Edition::E2014).map(|c| c.hit_die),
            Some(10)
        );
        assert_eq!(rules.proficiency_bonus(5), Some(3));
        assert_eq!(rules.proficiency_bonus(0), None);
        assert_eq!(rules.proficiency_bonus(21), None);
        assert_eq!(rules.proficiency_bonus_or_default(21), 2);
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let data = RuleSetData {
            races: vec![
                RaceRecord {
                    slug: "elf".to_string(),
                    name: "Elf".to_string(),
                    ability_bonuses: Default::default(),
                    traits: vec![],
                    languages: vec![],
                    proficiencies: vec![],
                    speed: 30,
                    hp_bonus_per_level: 0,
                    variants: vec![],
                    lineages: vec![],
                };
                2
            ],
            proficiency_bonus_by_level: tables::proficiency_bonus_table(),
            ..Default::default()
        };

        let err = RuleSet::from_data(data).unwrap_err();
        assert!(matches!(err, RuleSetError::DuplicateSlug { kind: "race", .. }));
    }

    #[test]
    fn rejects_short_proficiency_table() {
        let data = RuleSetData {
            proficiency_bonus_by_level: vec![2, 2, 2],
            ..Default::default()
        };

        let err = RuleSet::from_data(data).unwrap_err();
        assert!(matches!(
            err,
            RuleSetError::ProficiencyTable {
                expected: 20,
                found: 3
            }
        ));
    }

    #[test]
    fn srd_data_passes_validation() {
        assert!(RuleSet::from_data(srd::srd_data()).is_ok());
    }

    #[test]
    fn srd_data_round_trips_through_json() {
        let json = serde_json::to_string(&srd::srd_data()).unwrap();
        let rules = RuleSet::from_json_str(&json).unwrap();
        assert!(rules.class("wizard", Edition::E2014).is_some());
        assert!(rules.class("cleric", Edition::E2024).is_some());
    }

    #[test]
    fn edition_override_wins() {
        let rules = RuleSet::srd();

        let legacy = rules.class("cleric", Edition::E2014).unwrap();
        let modern = rules.class("cleric", Edition::E2024).unwrap();
        assert!(legacy.feature_options.is_empty());
        assert!(!modern.feature_options.is_empty());
        // Classes without an override fall back to the base record
        assert!(rules.class("fighter", Edition::E2024).is_some());
    }

    #[test]
    fn srd_tables_are_consistent() {
        let rules = RuleSet::srd();
        assert_eq!(rules.spell_slots("wizard", Edition::E2014, 1)[0], 2);
        assert_eq!(rules.cantrips_known("wizard", Edition::E2014, 4), 4);
        assert_eq!(rules.spells_known("sorcerer", Edition::E2014, 1), Some(2));
        assert_eq!(rules.spells_known("wizard", Edition::E2014, 1), None);
        assert_eq!(rules.spell_slots("paladin", Edition::E2014, 1), [0; SPELL_LEVELS]);
    }
}
