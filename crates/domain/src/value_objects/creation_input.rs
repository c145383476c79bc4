//! The raw choices a player makes while building a character.
//!
//! `CreationInput` is transient: the wizard collaborator fills it in and hands
//! it to [`crate::game_systems::derive`], which produces the persisted
//! [`crate::Character`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::edition::Edition;
use super::hit_points::HpMethod;
use super::inventory::ItemGrant;
use super::skill::Skill;
use crate::entities::Personality;

/// How the raw ability scores were generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbilityMethod {
    #[default]
    StandardArray,
    PointBuy,
    Rolled,
    Manual,
}

/// The player's pick for one class equipment choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentChoiceSelection {
    pub choice_id: String,
    /// Each option is a bundle of items
    pub options: Vec<Vec<ItemGrant>>,
    pub selected: usize,
}

impl EquipmentChoiceSelection {
    pub fn selected_items(&self) -> Option<&[ItemGrant]> {
        self.options.get(self.selected).map(Vec::as_slice)
    }
}

/// Spell picks; which lists matter depends on the class's spellcasting type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSelection {
    #[serde(default)]
    pub cantrips: Vec<String>,
    #[serde(default)]
    pub known: Vec<String>,
    #[serde(default)]
    pub prepared: Vec<String>,
    #[serde(default)]
    pub spellbook: Vec<String>,
}

/// Everything the derivation needs, as chosen in the creation wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreationInput {
    pub name: String,
    /// Race/species slug
    pub race: String,
    pub variant: Option<String>,
    pub lineage: Option<String>,
    /// Class slug
    pub class: String,
    pub subclass: Option<String>,
    pub ability_scores: BTreeMap<Ability, i32>,
    pub ability_method: AbilityMethod,
    /// Background slug
    pub background: Option<String>,
    pub alignment: String,
    pub skills: Vec<Skill>,
    pub expertise: Vec<Skill>,
    pub equipment_choices: Vec<EquipmentChoiceSelection>,
    pub starting_inventory: Vec<ItemGrant>,
    pub spells: SpellSelection,
    pub feats: Vec<String>,
    pub fighting_style: Option<String>,
    /// Slugs of selected class feature options (e.g. a divine order)
    pub feature_options: Vec<String>,
    pub languages: Vec<String>,
    pub personality: Personality,
    pub hp_method: HpMethod,
    pub rolled_hp: Option<u32>,
    pub level: u8,
    pub edition: Edition,
}
