//! Character content - spellcasting, features, and choices owned by a character.
//!
//! These structs represent the character's personal collection of abilities,
//! including tracking of slot usage and the choices made while levelling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::Ability;

/// Number of spell levels tracked by slot arrays.
pub const SPELL_LEVELS: usize = 9;

/// Which list-management rule a class uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellcastingType {
    /// Fixed list, changed on level-up
    Known,
    /// Daily-swappable subset of the class list
    Prepared,
    /// Permanent spellbook plus a daily prepared subset
    Wizard,
}

/// A character's spellcasting data.
///
/// # Invariants
///
/// - `used_spell_slots[i] <= spell_slots[i]` for every spell level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spellcasting {
    ability: Ability,
    spell_save_dc: i32,
    spell_attack_bonus: i32,
    spell_slots: [u8; SPELL_LEVELS],
    used_spell_slots: [u8; SPELL_LEVELS],
    spellcasting_type: SpellcastingType,
    #[serde(default)]
    cantrips_known: Vec<String>,
    #[serde(default)]
    spells_known: Vec<String>,
    #[serde(default)]
    spellbook: Vec<String>,
    #[serde(default)]
    prepared_spells: Vec<String>,
}

impl Spellcasting {
    /// Create spellcasting data with full slots and empty spell lists.
    pub fn new(
        ability: Ability,
        spellcasting_type: SpellcastingType,
        spell_slots: [u8; SPELL_LEVELS],
    ) -> Self {
        Self {
            ability,
            spell_save_dc: 0,
            spell_attack_bonus: 0,
            spell_slots,
            used_spell_slots: [0; SPELL_LEVELS],
            spellcasting_type,
            cantrips_known: Vec::new(),
            spells_known: Vec::new(),
            spellbook: Vec::new(),
            prepared_spells: Vec::new(),
        }
    }

    // Read-only accessors

    pub fn ability(&self) -> Ability {
        self.ability
    }

    pub fn spell_save_dc(&self) -> i32 {
        self.spell_save_dc
    }

    pub fn spell_attack_bonus(&self) -> i32 {
        self.spell_attack_bonus
    }

    /// Maximum slots per spell level (index 0 is 1st level).
    pub fn spell_slots(&self) -> &[u8; SPELL_LEVELS] {
        &self.spell_slots
    }

    /// Consumed slots per spell level.
    pub fn used_spell_slots(&self) -> &[u8; SPELL_LEVELS] {
        &self.used_spell_slots
    }

    pub fn spellcasting_type(&self) -> SpellcastingType {
        self.spellcasting_type
    }

    pub fn cantrips_known(&self) -> &[String] {
        &self.cantrips_known
    }

    pub fn spells_known(&self) -> &[String] {
        &self.spells_known
    }

    pub fn spellbook(&self) -> &[String] {
        &self.spellbook
    }

    pub fn prepared_spells(&self) -> &[String] {
        &self.prepared_spells
    }

    /// Slots still available at a spell level (1-9).
    pub fn available_slots(&self, spell_level: u8) -> u8 {
        match slot_index(spell_level) {
            Some(i) => self.spell_slots[i].saturating_sub(self.used_spell_slots[i]),
            None => 0,
        }
    }

    pub fn total_used_slots(&self) -> u32 {
        self.used_spell_slots.iter().map(|&n| u32::from(n)).sum()
    }

    // Builder-style methods

    pub fn with_cantrips(mut self, cantrips: Vec<String>) -> Self {
        self.cantrips_known = cantrips;
        self
    }

    pub fn with_spells_known(mut self, spells: Vec<String>) -> Self {
        self.spells_known = spells;
        self
    }

    pub fn with_spellbook(mut self, spells: Vec<String>) -> Self {
        self.spellbook = spells;
        self
    }

    pub fn with_prepared(mut self, spells: Vec<String>) -> Self {
        self.prepared_spells = spells;
        self
    }

    // Mutation methods

    pub(crate) fn set_casting_numbers(&mut self, save_dc: i32, attack_bonus: i32) {
        self.spell_save_dc = save_dc;
        self.spell_attack_bonus = attack_bonus;
    }

    /// Replace the slot maximums, clamping usage so it never exceeds them.
    pub(crate) fn set_spell_slots(&mut self, spell_slots: [u8; SPELL_LEVELS]) {
        self.spell_slots = spell_slots;
        for (used, max) in self.used_spell_slots.iter_mut().zip(spell_slots) {
            *used = (*used).min(max);
        }
    }

    /// Consume one slot of a spell level; a level with none left is unchanged.
    pub(crate) fn use_slot(&mut self, spell_level: u8) {
        if let Some(i) = slot_index(spell_level) {
            if self.used_spell_slots[i] < self.spell_slots[i] {
                self.used_spell_slots[i] += 1;
            }
        }
    }

    /// Restore all spell slots (e.g., after a long rest).
    pub(crate) fn restore_all_slots(&mut self) {
        self.used_spell_slots = [0; SPELL_LEVELS];
    }

    /// Add a cantrip.
    pub(crate) fn add_cantrip(&mut self, spell_slug: impl Into<String>) -> bool {
        let slug = spell_slug.into();
        if self.cantrips_known.contains(&slug) {
            return false;
        }
        self.cantrips_known.push(slug);
        true
    }

    pub(crate) fn remove_cantrip(&mut self, spell_slug: &str) {
        self.cantrips_known.retain(|s| s != spell_slug);
    }
}

fn slot_index(spell_level: u8) -> Option<usize> {
    match spell_level {
        1..=9 => Some(usize::from(spell_level) - 1),
        _ => None,
    }
}

/// A feature the character has, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEntry {
    name: String,
    /// e.g. the class, subclass, or race name
    source: String,
    /// Character level at which the feature was gained
    level: u8,
}

impl FeatureEntry {
    pub fn new(name: impl Into<String>, source: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

/// Free-text personality fields from the creation wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personality {
    pub traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub backstory: String,
}

/// How an ability score improvement was spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum AsiChoice {
    /// Raise abilities directly, two points in total
    Abilities { increases: BTreeMap<Ability, i32> },
    /// Take a feat instead; `increases` records what the feat actually applied
    Feat {
        slug: String,
        #[serde(default)]
        increases: BTreeMap<Ability, i32>,
    },
}

impl AsiChoice {
    /// Score increases actually applied by this choice.
    pub fn increases(&self) -> &BTreeMap<Ability, i32> {
        match self {
            AsiChoice::Abilities { increases } | AsiChoice::Feat { increases, .. } => increases,
        }
    }
}
