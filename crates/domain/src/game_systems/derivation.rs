//! Character derivation: creation input in, fully-populated character out.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::calculations::refresh_derived;
use super::equipment::{auto_equip, build_inventory};
use super::spellcasting::derive_spellcasting;
use crate::aggregates::Character;
use crate::entities::FeatureEntry;
use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::rules::{ClassRecord, RaceRecord, RuleLookup, MAX_LEVEL};
use crate::value_objects::{
    average_hit_points_per_level, Ability, AbilityScores, CreationInput, Edition, HitDice,
    HpMethod, SavingThrow, Skill, SkillEntry, SkillOverlay, ABILITY_SCORE_CAP,
};

/// Language every character speaks.
pub const COMMON_LANGUAGE: &str = "Common";

/// Hit points gained for a level past the first.
pub(crate) fn hit_points_per_level(hit_die: u8, constitution_modifier: i32, race_bonus: i32) -> i32 {
    average_hit_points_per_level(hit_die, constitution_modifier) + race_bonus
}

fn push_unique(list: &mut Vec<String>, items: impl IntoIterator<Item = impl AsRef<str>>) {
    for item in items {
        let item = item.as_ref();
        if !list.iter().any(|existing| existing == item) {
            list.push(item.to_string());
        }
    }
}

/// Class features, and subclass features when one is chosen, gained up to `level`.
pub(crate) fn class_features(
    class: &ClassRecord,
    subclass: Option<&str>,
    level: u8,
) -> Vec<FeatureEntry> {
    let mut features: Vec<FeatureEntry> = class
        .features
        .iter()
        .filter(|f| f.level <= level)
        .map(|f| FeatureEntry::new(&f.name, &class.name, f.level))
        .collect();
    if let Some(sub) = subclass.and_then(|slug| class.subclass(slug)) {
        features.extend(
            sub.features
                .iter()
                .filter(|f| f.level <= level)
                .map(|f| FeatureEntry::new(&f.name, &sub.name, f.level)),
        );
    }
    features
}

fn final_abilities(
    input: &CreationInput,
    race: &RaceRecord,
    variant: Option<&str>,
    rules: &dyn RuleLookup,
) -> (AbilityScores, Vec<String>) {
    let mut abilities = AbilityScores::from_scores(&input.ability_scores);
    let bonuses = variant
        .and_then(|slug| race.variant(slug))
        .map(|v| &v.ability_bonuses)
        .unwrap_or(&race.ability_bonuses);
    for (&ability, &bonus) in bonuses {
        abilities.adjust(ability, bonus);
    }

    let mut feats = Vec::new();
    for slug in &input.feats {
        let Some(feat) = rules.feat(slug) else {
            warn!(slug = %slug, "Unknown feat, skipping");
            continue;
        };
        for (&ability, &increase) in &feat.ability_increases {
            let room = (ABILITY_SCORE_CAP - abilities.score(ability)).max(0);
            abilities.adjust(ability, increase.min(room));
        }
        push_unique(&mut feats, [slug]);
    }
    (abilities, feats)
}

fn skill_entries(input: &CreationInput, class: &ClassRecord, background_skills: &[Skill]) -> BTreeMap<Skill, SkillEntry> {
    for skill in &input.skills {
        if !class.skill_proficiencies.contains(skill) {
            debug!(skill = skill.display_name(), class = %class.slug, "Skill is not a class option");
        }
    }
    Skill::ALL
        .iter()
        .map(|&skill| {
            let proficient = input.skills.contains(&skill) || background_skills.contains(&skill);
            let expertise = input.expertise.contains(&skill);
            (skill, SkillEntry::new(proficient, expertise))
        })
        .collect()
}

/// Selected class feature options as (feature name, overlay).
fn feature_options(
    input: &CreationInput,
    class: &ClassRecord,
) -> Result<(Vec<String>, Vec<FeatureEntry>, Vec<SkillOverlay>), DomainError> {
    let mut slugs = Vec::new();
    let mut features = Vec::new();
    let mut overlays = Vec::new();
    let mut groups: Vec<&str> = Vec::new();

    for slug in &input.feature_options {
        let Some(option) = class.feature_option(slug) else {
            warn!(slug = %slug, class = %class.slug, "Unknown class feature option, skipping");
            continue;
        };
        if groups.contains(&option.group.as_str()) {
            return Err(DomainError::invalid_choice(format!(
                "Only one '{}' option may be chosen",
                option.group
            )));
        }
        groups.push(&option.group);
        slugs.push(option.slug.clone());
        features.push(FeatureEntry::new(&option.name, &class.name, 1));
        overlays.extend(option.skill_overlay.clone());
    }
    Ok((slugs, features, overlays))
}

fn first_level_die(input: &CreationInput, hit_die: u8) -> i32 {
    let die = u32::from(hit_die);
    let value = match (input.hp_method, input.rolled_hp) {
        (HpMethod::Rolled, Some(rolled)) => rolled.clamp(1, die.max(1)),
        (HpMethod::Rolled, None) => {
            warn!("Rolled hit points requested without a roll, using the maximum");
            die
        }
        (HpMethod::Max, _) => die,
    };
    i32::try_from(value).unwrap_or(i32::from(hit_die))
}

/// Turn validated creation input into a fully derived character.
///
/// Fails with [`DomainError::IncompleteData`] when the race or class slug is
/// not in the rule set.
pub fn derive(input: &CreationInput, rules: &dyn RuleLookup) -> Result<Character, DomainError> {
    let race = rules
        .race(&input.race)
        .ok_or_else(|| DomainError::incomplete_data("race", &input.race))?;
    let class = rules
        .class(&input.class, input.edition)
        .ok_or_else(|| DomainError::incomplete_data("class", &input.class))?;

    let level = input.level.max(1);
    if level > MAX_LEVEL {
        return Err(DomainError::validation(format!(
            "Level must be between 1 and {MAX_LEVEL}, got {level}"
        )));
    }

    let variant = input.variant.as_deref().filter(|slug| {
        let found = race.variant(slug).is_some();
        if !found {
            warn!(variant = %slug, race = %race.slug, "Unknown race variant, ignoring");
        }
        found
    });
    let lineage = input.lineage.as_deref().and_then(|slug| {
        let found = race.lineage(slug);
        if found.is_none() {
            warn!(lineage = %slug, race = %race.slug, "Unknown lineage, ignoring");
        }
        found
    });
    let background = input.background.as_deref().and_then(|slug| {
        let found = rules.background(slug);
        if found.is_none() {
            warn!(background = %slug, "Unknown background, ignoring");
        }
        found
    });
    let subclass = input.subclass.as_deref().and_then(|slug| {
        let Some(sub) = class.subclass(slug) else {
            warn!(subclass = %slug, class = %class.slug, "Unknown subclass, ignoring");
            return None;
        };
        if level < class.subclass_level {
            warn!(subclass = %slug, level, "Subclass chosen before it unlocks, ignoring");
            return None;
        }
        Some(sub)
    });

    let (abilities, selected_feats) = final_abilities(input, race, variant, rules);
    let proficiency_bonus = rules.proficiency_bonus_or_default(level);

    // Hit points: first level from the die, later levels at the average roll
    let con = abilities.modifier(Ability::Constitution);
    let first_level = (first_level_die(input, class.hit_die) + con + race.hp_bonus_per_level).max(1);
    let later_levels = i32::from(level - 1) * hit_points_per_level(class.hit_die, con, race.hp_bonus_per_level);
    let max_hit_points = first_level + later_levels;

    let background_skills = background
        .map(|b| b.skill_proficiencies.as_slice())
        .unwrap_or(&[]);
    let skills = skill_entries(input, class, background_skills);
    let (option_slugs, option_features, skill_overlays) = feature_options(input, class)?;

    let saving_throws = Ability::ALL
        .iter()
        .map(|&ability| (ability, SavingThrow::new(class.saving_throws.contains(&ability))))
        .collect();

    // Features: class and subclass, chosen options, race, background
    let mut features = class_features(class, subclass.map(|s| s.slug.as_str()), level);
    if let Some(style) = &input.fighting_style {
        features.push(FeatureEntry::new(format!("Fighting Style: {style}"), &class.name, 1));
    }
    features.extend(option_features);
    let race_traits = race
        .traits
        .iter()
        .chain(variant.and_then(|slug| race.variant(slug)).into_iter().flat_map(|v| v.traits.iter()))
        .chain(lineage.into_iter().flat_map(|l| l.traits.iter()));
    features.extend(race_traits.map(|t| FeatureEntry::new(t, &race.name, 1)));
    if let Some((name, feature)) = background.and_then(|b| b.feature.as_ref().map(|f| (&b.name, f))) {
        features.push(FeatureEntry::new(feature, name, 1));
    }

    let mut proficiencies = Vec::new();
    push_unique(&mut proficiencies, &class.proficiencies);
    push_unique(&mut proficiencies, &race.proficiencies);

    let mut languages = vec![COMMON_LANGUAGE.to_string()];
    push_unique(&mut languages, &race.languages);
    push_unique(&mut languages, &class.languages);
    if let Some(background) = background {
        push_unique(&mut languages, &background.languages);
    }
    push_unique(&mut languages, &input.languages);

    let spellcasting = derive_spellcasting(class, &abilities, level, &input.spells, rules);
    let inventory = build_inventory(
        class,
        background,
        level,
        &input.equipment_choices,
        &input.starting_inventory,
    );

    let mut character = Character {
        id: CharacterId::new(),
        name: input.name.clone(),
        race: lineage
            .map(|l| l.name.clone())
            .or_else(|| variant.and_then(|slug| race.variant(slug)).map(|v| v.name.clone()))
            .unwrap_or_else(|| race.name.clone()),
        race_slug: race.slug.clone(),
        variant: variant.map(str::to_string),
        lineage: lineage.map(|l| l.slug.clone()),
        class_name: class.name.clone(),
        class_slug: class.slug.clone(),
        subclass: subclass.map(|s| s.name.clone()),
        subclass_slug: subclass.map(|s| s.slug.clone()),
        level,
        alignment: input.alignment.clone(),
        background: background.map(|b| b.name.clone()),
        edition: input.edition,
        ability_method: input.ability_method,
        abilities,
        skills,
        skill_overlays,
        saving_throws,
        passive_perception: 0,
        proficiency_bonus,
        armor_class: 0,
        hit_points: max_hit_points,
        max_hit_points,
        hit_dice: HitDice::full(u32::from(level), class.hit_die),
        hp_bonus_per_level: race.hp_bonus_per_level,
        speed: race.speed,
        inventory,
        equipped_armor: None,
        equipped_weapons: Vec::new(),
        spellcasting,
        features,
        proficiencies,
        languages,
        selected_feats,
        fighting_style: input.fighting_style.clone(),
        feature_options: option_slugs,
        asi_choices: BTreeMap::new(),
        cantrip_choices_by_level: BTreeMap::new(),
        personality: input.personality.clone(),
    };

    auto_equip(&mut character, rules);
    refresh_derived(&mut character, rules);

    debug!(
        character_id = %character.id,
        race = %character.race_slug,
        class = %character.class_slug,
        level,
        max_hit_points,
        armor_class = character.armor_class,
        "Derived character"
    );
    Ok(character)
}

/// Roll a class hit die for the `rolled` hit point method.
pub fn roll_hit_points<F>(
    rules: &dyn RuleLookup,
    class: &str,
    edition: Edition,
    mut roll_dice: F,
) -> Result<u32, DomainError>
where
    F: FnMut(u32, u32) -> Vec<u32>,
{
    let class = rules
        .class(class, edition)
        .ok_or_else(|| DomainError::incomplete_data("class", class))?;
    let die = u32::from(class.hit_die);
    let roll = roll_dice(1, die).first().copied().unwrap_or(die);
    Ok(roll.clamp(1, die.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SpellcastingType;
    use crate::game_systems::test_support::*;
    use crate::value_objects::{EquipmentChoiceSelection, ItemGrant, SpellSelection};

    fn choice(id: &str, options: Vec<Vec<ItemGrant>>, selected: usize) -> EquipmentChoiceSelection {
        EquipmentChoiceSelection {
            choice_id: id.to_string(),
            options,
            selected,
        }
    }

    mod lookups {
        use super::*;

        #[test]
        fn unknown_race_is_incomplete_data() {
            let input = CreationInput {
                race: "tiefling".to_string(),
                ..fighter_input()
            };
            let err = derive(&input, &rules()).unwrap_err();
            assert_eq!(err, DomainError::incomplete_data("race", "tiefling"));
            assert!(!err.is_recoverable());
        }

        #[test]
        fn unknown_class_is_incomplete_data() {
            let input = CreationInput {
                class: "artificer".to_string(),
                ..fighter_input()
            };
            let err = derive(&input, &rules()).unwrap_err();
            assert!(matches!(err, DomainError::IncompleteData { kind: "class", .. }));
        }

        #[test]
        fn level_above_twenty_is_rejected() {
            let input = CreationInput {
                level: 21,
                ..fighter_input()
            };
            assert!(matches!(
                derive(&input, &rules()),
                Err(DomainError::Validation(_))
            ));
        }

        #[test]
        fn unknown_background_is_ignored() {
            let input = CreationInput {
                background: Some("pirate".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();
            assert_eq!(character.background(), None);
        }
    }

    mod abilities_and_hit_points {
        use super::*;

        #[test]
        fn human_fighter_baseline() {
            let character = fighter();

            assert_eq!(character.level(), 1);
            assert_eq!(character.abilities().score(Ability::Strength), 16);
            assert_eq!(character.abilities().modifier(Ability::Dexterity), 2);
            assert_eq!(character.proficiency_bonus(), 2);
            assert_eq!(character.max_hit_points(), 12);
            assert_eq!(character.hit_points(), 12);
            assert_eq!(character.hit_dice().max(), 1);
            assert_eq!(character.hit_dice().die_type(), 10);
            assert_eq!(character.armor_class(), 12);
            assert!(character.spellcasting().is_none());
            assert_invariants(&character, &rules());
        }

        #[test]
        fn variant_bonuses_replace_base_race_bonuses() {
            let input = CreationInput {
                variant: Some("variant-human".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.abilities().score(Ability::Strength), 16);
            assert_eq!(character.abilities().score(Ability::Dexterity), 13);
            assert_eq!(character.abilities().score(Ability::Constitution), 14);
            assert_eq!(character.race(), "Variant Human");
            assert_eq!(character.variant(), Some("variant-human"));
        }

        #[test]
        fn dwarves_gain_a_hit_point_per_level() {
            let input = CreationInput {
                race: "dwarf".to_string(),
                level: 3,
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            // CON 13 + 2 = 15 (+2); level 1: 10 + 2 + 1, then 9 per level
            assert_eq!(character.max_hit_points(), 31);
            assert_eq!(character.hp_bonus_per_level(), 1);
            assert_eq!(character.speed(), 25);
            assert!(character.has_feature("Dwarven Toughness"));
        }

        #[test]
        fn rolled_hit_points_use_the_stored_roll() {
            let input = CreationInput {
                hp_method: HpMethod::Rolled,
                rolled_hp: Some(7),
                ..fighter_input()
            };
            assert_eq!(derive(&input, &rules()).unwrap().max_hit_points(), 9);

            let too_high = CreationInput {
                hp_method: HpMethod::Rolled,
                rolled_hp: Some(15),
                ..fighter_input()
            };
            assert_eq!(derive(&too_high, &rules()).unwrap().max_hit_points(), 12);
        }

        #[test]
        fn hit_points_never_drop_below_one() {
            let input = CreationInput {
                class: "wizard".to_string(),
                ability_scores: scores([8, 10, 3, 16, 10, 10]),
                hp_method: HpMethod::Rolled,
                rolled_hp: Some(1),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();
            assert_eq!(character.max_hit_points(), 1);
        }

        #[test]
        fn higher_level_creation_uses_later_package_and_bonus() {
            let input = CreationInput {
                level: 5,
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.proficiency_bonus(), 3);
            assert_eq!(character.max_hit_points(), 12 + 4 * 8);
            assert_eq!(
                character.inventory_item("potion-of-healing").map(|i| i.quantity()),
                Some(2)
            );
            assert!(character.has_feature("Extra Attack"));
            assert!(!character.has_feature("Indomitable"));
        }
    }

    mod skills_and_features {
        use super::*;

        #[test]
        fn class_and_background_skills_are_proficient() {
            let input = CreationInput {
                background: Some("hermit".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert!(character.skill(Skill::Athletics).proficient());
            assert!(character.skill(Skill::Medicine).proficient());
            assert!(character.skill(Skill::Religion).proficient());
            assert!(!character.skill(Skill::Stealth).proficient());
            // Athletics: STR +3, PB +2
            assert_eq!(character.skill(Skill::Athletics).value(), 5);
            // Perception: WIS 13 (+1), PB +2
            assert_eq!(character.passive_perception(), 13);
            assert_eq!(character.background(), Some("Hermit"));
            assert!(character.has_feature("Discovery"));
            assert_invariants(&character, &rules());
        }

        #[test]
        fn expertise_doubles_and_requires_proficiency() {
            let input = CreationInput {
                class: "rogue".to_string(),
                ability_scores: scores([10, 15, 12, 12, 10, 10]),
                skills: vec![
                    Skill::Stealth,
                    Skill::Acrobatics,
                    Skill::Perception,
                    Skill::Deception,
                ],
                expertise: vec![Skill::Stealth, Skill::History],
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert!(character.skill(Skill::Stealth).expertise());
            assert_eq!(character.skill(Skill::Stealth).value(), 3 + 4);
            assert!(!character.skill(Skill::History).expertise());
            assert_invariants(&character, &rules());
        }

        #[test]
        fn saving_throws_follow_class() {
            let character = fighter();
            let saves = character.saving_throws();

            assert!(saves[&Ability::Strength].proficient());
            assert_eq!(saves[&Ability::Strength].value(), 5);
            assert_eq!(saves[&Ability::Constitution].value(), 4);
            assert!(!saves[&Ability::Charisma].proficient());
            assert_eq!(saves[&Ability::Charisma].value(), -1);
        }

        #[test]
        fn divine_order_overlay_adds_wisdom_to_named_skills() {
            let input = CreationInput {
                class: "cleric".to_string(),
                edition: Edition::E2024,
                ability_scores: scores([10, 10, 14, 10, 15, 10]),
                skills: vec![Skill::Religion, Skill::Insight],
                feature_options: vec!["thaumaturge".to_string()],
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.skill_overlays().len(), 1);
            // INT +0, not proficient, plus WIS +3
            assert_eq!(character.skill(Skill::Arcana).value(), 3);
            // INT +0, PB +2, plus WIS +3
            assert_eq!(character.skill(Skill::Religion).value(), 5);
            assert!(character.has_feature("Thaumaturge"));
            assert!(character.has_feature("Divine Order"));
            assert_invariants(&character, &rules());
        }

        #[test]
        fn options_from_one_group_are_exclusive() {
            let input = CreationInput {
                class: "cleric".to_string(),
                edition: Edition::E2024,
                feature_options: vec!["protector".to_string(), "thaumaturge".to_string()],
                ..fighter_input()
            };
            assert!(matches!(
                derive(&input, &rules()),
                Err(DomainError::InvalidChoice(_))
            ));
        }

        #[test]
        fn legacy_cleric_takes_subclass_at_first_level() {
            let input = CreationInput {
                class: "cleric".to_string(),
                subclass: Some("life".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.subclass(), Some("Life Domain"));
            assert!(character.has_feature("Disciple of Life"));
            assert!(!character.has_feature("Preserve Life"));
        }

        #[test]
        fn early_subclass_is_ignored() {
            let input = CreationInput {
                subclass: Some("champion".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();
            assert_eq!(character.subclass_slug(), None);
        }

        #[test]
        fn fighting_style_and_racial_traits_become_features() {
            let input = CreationInput {
                race: "elf".to_string(),
                lineage: Some("wood-elf".to_string()),
                fighting_style: Some("Archery".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert!(character.has_feature("Fighting Style: Archery"));
            assert!(character.has_feature("Fey Ancestry"));
            assert!(character.has_feature("Mask of the Wild"));
            assert_eq!(character.race(), "Wood Elf");
        }

        #[test]
        fn languages_are_deduplicated_case_sensitively() {
            let input = CreationInput {
                race: "dwarf".to_string(),
                class: "rogue".to_string(),
                background: Some("soldier".to_string()),
                languages: vec![
                    "Dwarvish".to_string(),
                    "Giant".to_string(),
                    "common".to_string(),
                ],
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(
                character.languages(),
                ["Common", "Dwarvish", "Thieves' Cant", "Giant", "common"]
            );
        }
    }

    mod equipment_resolution {
        use super::*;

        fn fighter_choices(armor: usize, weapons: usize) -> Vec<EquipmentChoiceSelection> {
            let class = rules().class("fighter", Edition::E2014).cloned().unwrap();
            vec![
                choice("fighter-armor", class.equipment_choices[0].options.clone(), armor),
                choice("fighter-weapons", class.equipment_choices[1].options.clone(), weapons),
            ]
        }

        #[test]
        fn chosen_armor_and_shield_are_equipped() {
            let input = CreationInput {
                equipment_choices: fighter_choices(0, 0),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.equipped_armor(), Some("chain-mail"));
            assert_eq!(character.equipped_weapons(), ["longsword", "shield"]);
            // Chain mail 16, shield +2
            assert_eq!(character.armor_class(), 18);
            assert_invariants(&character, &rules());
        }

        #[test]
        fn out_of_range_choice_is_skipped() {
            let input = CreationInput {
                equipment_choices: fighter_choices(0, 5),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert!(character.inventory_item("longsword").is_none());
            assert_eq!(character.armor_class(), 16);
        }

        #[test]
        fn additions_merge_with_package_items() {
            let input = CreationInput {
                starting_inventory: vec![ItemGrant::new("explorers-pack", 1), ItemGrant::new("dagger", 2)],
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.inventory().len(), 2);
            assert_eq!(character.inventory_item("explorers-pack").map(|i| i.quantity()), Some(2));
            assert_eq!(character.inventory_item("dagger").map(|i| i.quantity()), Some(2));
        }

        #[test]
        fn equipment_less_background_contributes_nothing() {
            let input = CreationInput {
                background: Some("hermit".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();
            assert_eq!(character.inventory().len(), 1);
        }

        #[test]
        fn background_equipment_is_added() {
            let input = CreationInput {
                background: Some("acolyte".to_string()),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();
            assert!(character.inventory_item("prayer-book").is_some());
        }

        #[test]
        fn rogue_package_armor_is_worn() {
            let input = CreationInput {
                class: "rogue".to_string(),
                ability_scores: scores([10, 15, 12, 12, 10, 10]),
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(character.equipped_armor(), Some("leather-armor"));
            assert_eq!(character.equipped_weapons(), ["dagger"]);
            // Leather 11 + DEX 3
            assert_eq!(character.armor_class(), 14);
        }
    }

    mod spellcasting {
        use super::*;

        #[test]
        fn wizard_gets_spellbook_and_prepared_subset() {
            let character = wizard();
            let spells = character.spellcasting().unwrap();

            assert_eq!(spells.spellcasting_type(), SpellcastingType::Wizard);
            assert_eq!(spells.ability(), Ability::Intelligence);
            assert_eq!(spells.spell_save_dc(), 13);
            assert_eq!(spells.spell_attack_bonus(), 5);
            assert_eq!(spells.spell_slots()[0], 2);
            assert_eq!(spells.cantrips_known().len(), 3);
            assert_eq!(spells.spellbook().len(), 3);
            assert_eq!(spells.prepared_spells(), ["magic-missile", "shield"]);
            assert_eq!(spells.total_used_slots(), 0);
            assert_eq!(character.race(), "High Elf");
            assert_eq!(character.armor_class(), 13);
        }

        #[test]
        fn cantrips_are_truncated_to_the_table() {
            let mut input = wizard_input();
            input.spells.cantrips.extend(["ray-of-frost".to_string(), "shocking-grasp".to_string()]);
            let character = derive(&input, &rules()).unwrap();

            assert_eq!(
                character.spellcasting().unwrap().cantrips_known(),
                ["fire-bolt", "mage-hand", "light"]
            );
        }

        #[test]
        fn invalid_spell_picks_are_dropped() {
            let mut input = wizard_input();
            input.spells.cantrips = vec!["magic-missile".to_string(), "fire-bolt".to_string(), "fire-bolt".to_string()];
            input.spells.prepared.push("fireball".to_string());
            let character = derive(&input, &rules()).unwrap();
            let spells = character.spellcasting().unwrap();

            assert_eq!(spells.cantrips_known(), ["fire-bolt"]);
            // Fireball is not in the spellbook
            assert_eq!(spells.prepared_spells(), ["magic-missile", "shield"]);
        }

        #[test]
        fn known_casters_are_capped_by_the_known_table() {
            let input = CreationInput {
                class: "sorcerer".to_string(),
                spells: SpellSelection {
                    known: vec![
                        "magic-missile".to_string(),
                        "shield".to_string(),
                        "sleep".to_string(),
                    ],
                    ..Default::default()
                },
                ..fighter_input()
            };
            let character = derive(&input, &rules()).unwrap();
            let spells = character.spellcasting().unwrap();

            assert_eq!(spells.spellcasting_type(), SpellcastingType::Known);
            assert_eq!(spells.spells_known(), ["magic-missile", "shield"]);
        }

        #[test]
        fn half_caster_has_no_spellcasting_at_first_level() {
            let input = CreationInput {
                class: "paladin".to_string(),
                ..fighter_input()
            };
            assert!(derive(&input, &rules()).unwrap().spellcasting().is_none());

            let second = CreationInput {
                level: 2,
                ..input
            };
            let character = derive(&second, &rules()).unwrap();
            assert_eq!(character.spellcasting().unwrap().spell_slots()[0], 2);
        }
    }

    #[test]
    fn every_race_and_class_derives_at_every_level() {
        let rules = rules();
        let races: Vec<String> = rules.race_slugs().map(str::to_string).collect();
        let classes: Vec<String> = rules.class_slugs().map(str::to_string).collect();

        for race in &races {
            for class in &classes {
                for level in 1..=MAX_LEVEL {
                    let input = CreationInput {
                        race: race.clone(),
                        class: class.clone(),
                        level,
                        ..fighter_input()
                    };
                    let character = derive(&input, &rules).unwrap();

                    assert!(character.max_hit_points() > 0);
                    assert_eq!(character.hit_points(), character.max_hit_points());
                    assert_eq!(
                        Some(character.proficiency_bonus()),
                        rules.proficiency_bonus(level)
                    );
                    if let Some(spells) = character.spellcasting() {
                        assert_eq!(spells.total_used_slots(), 0);
                    }
                    assert_invariants(&character, &rules);
                }
            }
        }
    }

    #[test]
    fn each_derivation_gets_a_fresh_id() {
        assert_ne!(fighter().id(), fighter().id());
    }

    #[test]
    fn rolls_hit_die_within_range() {
        let rules = rules();
        assert_eq!(roll_hit_points(&rules, "fighter", Edition::E2014, fixed_roll(7)), Ok(7));
        assert_eq!(roll_hit_points(&rules, "fighter", Edition::E2014, fixed_roll(0)), Ok(1));
        assert_eq!(roll_hit_points(&rules, "wizard", Edition::E2014, fixed_roll(9)), Ok(6));
        assert!(roll_hit_points(&rules, "artificer", Edition::E2014, fixed_roll(3)).is_err());
    }

    #[test]
    fn character_round_trips_through_json() {
        let character = wizard();
        let json = serde_json::to_string(&character).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, character);
    }
}
