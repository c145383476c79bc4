//! Fixtures shared by the operator tests.

use std::collections::BTreeMap;

use crate::aggregates::Character;
use crate::rules::RuleSet;
use crate::value_objects::{Ability, CreationInput, Skill, SpellSelection};

pub(crate) fn rules() -> RuleSet {
    RuleSet::srd()
}

pub(crate) fn scores(values: [i32; 6]) -> BTreeMap<Ability, i32> {
    Ability::ALL.iter().copied().zip(values).collect()
}

/// Level-1 human fighter with no armor. Human +1 to everything turns
/// STR 15 / DEX 13 / CON 13 into 16 / 14 / 14.
pub(crate) fn fighter_input() -> CreationInput {
    CreationInput {
        name: "Brienne".to_string(),
        race: "human".to_string(),
        class: "fighter".to_string(),
        ability_scores: scores([15, 13, 13, 10, 12, 8]),
        skills: vec![Skill::Athletics, Skill::Perception],
        level: 1,
        ..Default::default()
    }
}

pub(crate) fn fighter() -> Character {
    super::derive(&fighter_input(), &rules()).unwrap()
}

/// Level-1 high elf wizard, INT 16, DEX 16 after the racial bonus.
pub(crate) fn wizard_input() -> CreationInput {
    CreationInput {
        name: "Elaith".to_string(),
        race: "elf".to_string(),
        lineage: Some("high-elf".to_string()),
        class: "wizard".to_string(),
        ability_scores: scores([8, 14, 14, 16, 12, 10]),
        skills: vec![Skill::Arcana, Skill::History],
        spells: SpellSelection {
            cantrips: vec![
                "fire-bolt".to_string(),
                "mage-hand".to_string(),
                "light".to_string(),
            ],
            spellbook: vec![
                "magic-missile".to_string(),
                "shield".to_string(),
                "sleep".to_string(),
            ],
            prepared: vec!["magic-missile".to_string(), "shield".to_string()],
            ..Default::default()
        },
        level: 1,
        ..Default::default()
    }
}

pub(crate) fn wizard() -> Character {
    super::derive(&wizard_input(), &rules()).unwrap()
}

/// Always rolls `value` on every die.
pub(crate) fn fixed_roll(value: u32) -> impl FnMut(u32, u32) -> Vec<u32> {
    move |count, _sides| vec![value; count as usize]
}

/// Check every invariant a character must hold after any operator.
pub(crate) fn assert_invariants(character: &Character, rules: &RuleSet) {
    use crate::value_objects::ability_modifier;

    assert_eq!(
        character.armor_class(),
        super::character_armor_class(character, rules),
        "armor class is stale"
    );

    let pb = character.proficiency_bonus();
    for (&skill, entry) in character.skills() {
        let modifier = ability_modifier(character.abilities().score(skill.ability()));
        let multiplier = match (entry.proficient(), entry.expertise()) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        };
        let overlay: i32 = character
            .skill_overlays()
            .iter()
            .map(|o| o.bonus_for(skill, character.abilities()))
            .sum();
        assert_eq!(entry.value(), modifier + multiplier * pb + overlay, "{skill:?}");
    }

    assert_eq!(character.validate(), Ok(()));
    assert!(character.hit_points() >= 0);
    assert!(character.hit_points() <= character.max_hit_points());
    assert!(character.hit_dice().current() <= character.hit_dice().max());
    assert!(character.equipped_weapons().len() <= 2);

    for item in character.inventory() {
        assert_eq!(
            item.equipped(),
            character.is_equipped(item.equipment_slug()),
            "equipped flag out of sync for {}",
            item.equipment_slug()
        );
    }
    if let Some(armor) = character.equipped_armor() {
        assert!(character.inventory_item(armor).is_some());
    }
    for weapon in character.equipped_weapons() {
        assert!(character.inventory_item(weapon).is_some());
    }

    if let Some(spellcasting) = character.spellcasting() {
        for (used, max) in spellcasting
            .used_spell_slots()
            .iter()
            .zip(spellcasting.spell_slots())
        {
            assert!(used <= max);
        }
    }
}
