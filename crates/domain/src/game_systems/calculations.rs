//! Derived-value recomputation.
//!
//! Every character operator finishes with [`refresh_derived`], which rebuilds
//! all derived numbers from the stored inputs instead of patching them.

use tracing::debug;

use crate::aggregates::Character;
use crate::rules::{ArmorCategory, EquipmentRecord, RuleLookup};
use crate::value_objects::{Ability, AbilityScores, Skill};

/// Armor class granted by an equipped shield.
pub const SHIELD_BONUS: i32 = 2;

/// Default medium-armor Dexterity cap when the item does not state one.
pub const MEDIUM_ARMOR_DEX_CAP: i32 = 2;

const UNARMORED_BASE: i32 = 10;

/// Armor class from body armor, Dexterity, and shield count.
pub fn armor_class(dex_modifier: i32, armor: Option<&EquipmentRecord>, shields: usize) -> i32 {
    let body = match armor.and_then(|a| a.armor_category.zip(a.armor_class)) {
        Some((ArmorCategory::Light, spec)) => spec.base + dex_modifier,
        Some((ArmorCategory::Medium, spec)) => {
            spec.base + dex_modifier.min(spec.max_bonus.unwrap_or(MEDIUM_ARMOR_DEX_CAP))
        }
        Some((ArmorCategory::Heavy, spec)) => spec.base,
        // A shield in the armor slot, or no armor data at all
        Some((ArmorCategory::Shield, _)) | None => UNARMORED_BASE + dex_modifier,
    };
    body + SHIELD_BONUS * i32::try_from(shields).unwrap_or(0)
}

/// Armor class of `character` given its current equipment.
pub fn character_armor_class(character: &Character, rules: &dyn RuleLookup) -> i32 {
    let armor = character.equipped_armor.as_deref().and_then(|slug| {
        let record = rules.equipment(slug);
        if record.is_none() {
            debug!(slug, "Equipped armor missing from rule set, treating as unarmored");
        }
        record
    });
    let shields = character
        .equipped_weapons
        .iter()
        .filter(|slug| rules.equipment(slug.as_str()).is_some_and(EquipmentRecord::is_shield))
        .count();
    armor_class(character.abilities.modifier(Ability::Dexterity), armor, shields)
}

/// Overlay bonus for one skill, summed over all overlays.
fn overlay_bonus(character: &Character, skill: Skill, abilities: &AbilityScores) -> i32 {
    character
        .skill_overlays
        .iter()
        .map(|overlay| overlay.bonus_for(skill, abilities))
        .sum()
}

/// Recompute skills, saves, passive perception, armor class, and spell numbers.
pub(crate) fn refresh_derived(character: &mut Character, rules: &dyn RuleLookup) {
    let pb = character.proficiency_bonus;
    let abilities = character.abilities.clone();

    for skill in Skill::ALL {
        let overlay = overlay_bonus(character, skill, &abilities);
        character
            .skills
            .entry(skill)
            .or_default()
            .recompute(abilities.modifier(skill.ability()), pb, overlay);
    }

    for ability in Ability::ALL {
        character
            .saving_throws
            .entry(ability)
            .or_default()
            .recompute(abilities.modifier(ability), pb);
    }

    character.passive_perception = 10 + character.skill(Skill::Perception).value();
    character.armor_class = character_armor_class(character, rules);

    if let Some(spellcasting) = character.spellcasting.as_mut() {
        let modifier = abilities.modifier(spellcasting.ability());
        spellcasting.set_casting_numbers(8 + pb + modifier, pb + modifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ArmorClassSpec;

    fn armor(category: ArmorCategory, base: i32, max_bonus: Option<i32>) -> EquipmentRecord {
        EquipmentRecord {
            slug: "test-armor".to_string(),
            name: "Test Armor".to_string(),
            armor_category: Some(category),
            armor_class: Some(ArmorClassSpec {
                base,
                dex_bonus: category != ArmorCategory::Heavy,
                max_bonus,
            }),
            weapon_category: None,
            properties: Vec::new(),
            weight: 10.0,
        }
    }

    mod armor_class_formula {
        use super::*;

        #[test]
        fn unarmored_is_ten_plus_dex() {
            assert_eq!(armor_class(2, None, 0), 12);
            assert_eq!(armor_class(-1, None, 0), 9);
        }

        #[test]
        fn light_armor_adds_full_dex() {
            let studded = armor(ArmorCategory::Light, 12, None);
            assert_eq!(armor_class(2, Some(&studded), 0), 14);
            assert_eq!(armor_class(5, Some(&studded), 0), 17);
        }

        #[test]
        fn medium_armor_caps_dex() {
            let scale = armor(ArmorCategory::Medium, 14, None);
            assert_eq!(armor_class(4, Some(&scale), 0), 16);
            assert_eq!(armor_class(1, Some(&scale), 0), 15);

            let custom_cap = armor(ArmorCategory::Medium, 14, Some(3));
            assert_eq!(armor_class(4, Some(&custom_cap), 0), 17);
        }

        #[test]
        fn medium_armor_applies_negative_dex() {
            let hide = armor(ArmorCategory::Medium, 12, Some(2));
            assert_eq!(armor_class(-1, Some(&hide), 0), 11);
        }

        #[test]
        fn heavy_armor_ignores_dex() {
            let plate = armor(ArmorCategory::Heavy, 18, None);
            assert_eq!(armor_class(3, Some(&plate), 0), 18);
            assert_eq!(armor_class(-2, Some(&plate), 0), 18);
        }

        #[test]
        fn shield_adds_flat_two() {
            let chain = armor(ArmorCategory::Heavy, 16, None);
            assert_eq!(armor_class(0, Some(&chain), 1), 18);
            assert_eq!(armor_class(2, None, 1), 14);
        }
    }
}
