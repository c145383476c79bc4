//! Level progression and the follow-up choices a level-up opens.
//!
//! `level_down` is the inverse of `level_up`: running one after the other
//! restores level, proficiency bonus, hit points, spell slots, and cantrips.

use std::collections::BTreeMap;

use tracing::debug;

use super::calculations::refresh_derived;
use super::derivation::hit_points_per_level;
use super::spellcasting::sync_spellcasting;
use crate::aggregates::Character;
use crate::entities::{AsiChoice, FeatureEntry};
use crate::error::DomainError;
use crate::events::{LevelDownOutcome, LevelUpOutcome, PendingChoice};
use crate::rules::{ClassRecord, RuleLookup, MAX_LEVEL};
use crate::value_objects::{Ability, ABILITY_SCORE_CAP};

/// Points an ability score improvement spreads across abilities.
pub const ASI_POINTS: i32 = 2;

const FEAT_SOURCE: &str = "Feat";

fn class_of<'a>(character: &Character, rules: &'a dyn RuleLookup) -> Result<&'a ClassRecord, DomainError> {
    rules
        .class(&character.class_slug, character.edition)
        .ok_or_else(|| DomainError::incomplete_data("class", &character.class_slug))
}

fn level_gain(character: &Character, class: &ClassRecord) -> i32 {
    hit_points_per_level(
        class.hit_die,
        character.abilities.modifier(Ability::Constitution),
        character.hp_bonus_per_level,
    )
}

/// Features the class (and chosen subclass) grant at exactly `level`.
fn features_at(character: &Character, class: &ClassRecord, level: u8) -> Vec<FeatureEntry> {
    let mut gained: Vec<FeatureEntry> = class
        .features
        .iter()
        .filter(|f| f.level == level)
        .map(|f| FeatureEntry::new(&f.name, &class.name, level))
        .collect();
    if let Some(sub) = character
        .subclass_slug
        .as_deref()
        .and_then(|slug| class.subclass(slug))
    {
        gained.extend(
            sub.features
                .iter()
                .filter(|f| f.level == level)
                .map(|f| FeatureEntry::new(&f.name, &sub.name, level)),
        );
    }
    gained
}

/// Shift max and current hit points by a Constitution modifier change,
/// applied retroactively to every level.
fn apply_constitution_change(character: &mut Character, modifier_delta: i32) {
    if modifier_delta == 0 {
        return;
    }
    let delta = modifier_delta * i32::from(character.level);
    character.max_hit_points = (character.max_hit_points + delta).max(1);
    character.hit_points = (character.hit_points + delta).clamp(1, character.max_hit_points);
}

/// Advance one level, healing to full.
///
/// At level 20 this is a no-op reported as [`LevelUpOutcome::AtMaxLevel`].
pub fn level_up(
    character: &Character,
    rules: &dyn RuleLookup,
) -> Result<(Character, LevelUpOutcome), DomainError> {
    if character.level >= MAX_LEVEL {
        return Ok((character.clone(), LevelUpOutcome::AtMaxLevel));
    }
    let class = class_of(character, rules)?;

    let mut next = character.clone();
    let new_level = character.level + 1;
    next.level = new_level;
    next.proficiency_bonus = rules
        .proficiency_bonus(new_level)
        .unwrap_or(character.proficiency_bonus);

    let gained = level_gain(&next, class);
    next.max_hit_points += gained;
    next.hit_points = next.max_hit_points;
    next.hit_dice.grow();

    sync_spellcasting(&mut next, class);
    let new_features = features_at(&next, class, new_level);
    next.features.extend(new_features);

    let mut pending = Vec::new();
    if class.is_asi_level(new_level) {
        pending.push(PendingChoice::AbilityScoreImprovement { level: new_level });
    }
    if let Some(spellcasting) = &next.spellcasting {
        let allowed = usize::from(class.cantrips_known(new_level));
        let known = spellcasting.cantrips_known().len();
        if allowed > known {
            pending.push(PendingChoice::Cantrip {
                level: new_level,
                count: u8::try_from(allowed - known).unwrap_or(u8::MAX),
            });
        }
    }
    if next.subclass_slug.is_none() && new_level >= class.subclass_level && !class.subclasses.is_empty() {
        pending.push(PendingChoice::Subclass { level: new_level });
    }

    refresh_derived(&mut next, rules);
    debug!(
        character_id = %next.id,
        level = new_level,
        hit_points_gained = gained,
        pending = pending.len(),
        "Leveled up"
    );
    Ok((
        next,
        LevelUpOutcome::LeveledUp {
            new_level,
            hit_points_gained: gained,
            pending,
        },
    ))
}

/// Undo the improvement recorded at the character's current level.
fn revert_improvement(character: &mut Character) -> bool {
    let Some(choice) = character.asi_choices.remove(&character.level) else {
        return false;
    };
    let mut con_delta = 0;
    for (&ability, &increase) in choice.increases() {
        let delta = character.abilities.adjust(ability, -increase);
        if ability == Ability::Constitution {
            con_delta += delta;
        }
    }
    apply_constitution_change(character, con_delta);
    if let AsiChoice::Feat { slug, .. } = &choice {
        character.selected_feats.retain(|s| s != slug);
    }
    true
}

/// Drop the cantrips learned at the current level, then any excess over
/// the class table for `new_level`.
fn roll_back_cantrips(character: &mut Character, class: &ClassRecord, new_level: u8) -> Vec<String> {
    let learned = character
        .cantrip_choices_by_level
        .remove(&character.level)
        .unwrap_or_default();
    let Some(spellcasting) = character.spellcasting.as_mut() else {
        return learned;
    };

    let mut removed = Vec::new();
    for slug in learned {
        spellcasting.remove_cantrip(&slug);
        removed.push(slug);
    }
    let allowed = usize::from(class.cantrips_known(new_level));
    while spellcasting.cantrips_known().len() > allowed {
        let Some(last) = spellcasting.cantrips_known().last().cloned() else {
            break;
        };
        spellcasting.remove_cantrip(&last);
        removed.push(last);
    }
    removed
}

/// Go back one level.
///
/// At level 1 this is a no-op reported as [`LevelDownOutcome::AtMinLevel`].
pub fn level_down(
    character: &Character,
    rules: &dyn RuleLookup,
) -> Result<(Character, LevelDownOutcome), DomainError> {
    if character.level <= 1 {
        return Ok((character.clone(), LevelDownOutcome::AtMinLevel));
    }
    let class = class_of(character, rules)?;

    let mut next = character.clone();
    let new_level = character.level - 1;

    let reverted_improvement = revert_improvement(&mut next);
    let removed_cantrips = roll_back_cantrips(&mut next, class, new_level);

    let lost = level_gain(&next, class);
    next.max_hit_points = (next.max_hit_points - lost).max(1);
    next.hit_points = (next.hit_points - lost).max(1).min(next.max_hit_points);
    next.hit_dice.shrink();

    next.level = new_level;
    next.proficiency_bonus = rules
        .proficiency_bonus(new_level)
        .unwrap_or(character.proficiency_bonus);
    sync_spellcasting(&mut next, class);

    if new_level < class.subclass_level {
        if let Some(name) = next.subclass.take() {
            next.features.retain(|f| f.source() != name);
        }
        next.subclass_slug = None;
    }
    next.features.retain(|f| f.level() <= new_level);

    refresh_derived(&mut next, rules);
    debug!(
        character_id = %next.id,
        level = new_level,
        hit_points_lost = lost,
        "Leveled down"
    );
    Ok((
        next,
        LevelDownOutcome::LeveledDown {
            new_level,
            hit_points_lost: lost,
            removed_cantrips,
            reverted_improvement,
        },
    ))
}

/// Learn a cantrip opened up by the level-up to `level`.
pub fn choose_cantrip(
    character: &Character,
    rules: &dyn RuleLookup,
    level: u8,
    slug: &str,
) -> Result<Character, DomainError> {
    let class = class_of(character, rules)?;
    let Some(spellcasting) = &character.spellcasting else {
        return Err(DomainError::invalid_choice("Character cannot cast spells"));
    };
    if level < 2 || level > character.level {
        return Err(DomainError::invalid_choice(format!(
            "No cantrip choice can be recorded for level {level}"
        )));
    }
    let spell = rules
        .spell(slug)
        .filter(|s| s.level == 0)
        .ok_or_else(|| DomainError::invalid_choice(format!("'{slug}' is not a known cantrip")))?;
    if !spell.classes.is_empty() && !spell.classes.contains(&character.class_slug) {
        return Err(DomainError::invalid_choice(format!(
            "'{slug}' is not on the {} spell list",
            class.name
        )));
    }
    if spellcasting.cantrips_known().iter().any(|c| c == slug) {
        return Err(DomainError::invalid_choice(format!("'{slug}' is already known")));
    }
    if spellcasting.cantrips_known().len() >= usize::from(class.cantrips_known(character.level)) {
        return Err(DomainError::invalid_choice("No cantrip choice is pending"));
    }

    let mut next = character.clone();
    if let Some(spellcasting) = next.spellcasting.as_mut() {
        spellcasting.add_cantrip(slug);
    }
    next.cantrip_choices_by_level
        .entry(level)
        .or_default()
        .push(slug.to_string());
    refresh_derived(&mut next, rules);
    Ok(next)
}

/// Pick the subclass and gain its features up to the current level.
pub fn choose_subclass(
    character: &Character,
    rules: &dyn RuleLookup,
    slug: &str,
) -> Result<Character, DomainError> {
    let class = class_of(character, rules)?;
    if character.subclass_slug.is_some() {
        return Err(DomainError::invalid_choice("A subclass has already been chosen"));
    }
    if character.level < class.subclass_level {
        return Err(DomainError::invalid_choice(format!(
            "{} subclasses unlock at level {}",
            class.name, class.subclass_level
        )));
    }
    let sub = class
        .subclass(slug)
        .ok_or_else(|| DomainError::invalid_choice(format!("Unknown subclass '{slug}'")))?;

    let mut next = character.clone();
    next.subclass = Some(sub.name.clone());
    next.subclass_slug = Some(sub.slug.clone());
    next.features.extend(
        sub.features
            .iter()
            .filter(|f| f.level <= character.level)
            .map(|f| FeatureEntry::new(&f.name, &sub.name, f.level)),
    );
    refresh_derived(&mut next, rules);
    Ok(next)
}

/// What the player asked for at an ability score improvement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImprovementRequest {
    /// Increases totalling two points
    Abilities(BTreeMap<Ability, i32>),
    Feat(String),
}

/// Resolve the ability score improvement opened at `level`.
///
/// Constitution increases adjust hit points for every level already gained.
pub fn apply_ability_score_improvement(
    character: &Character,
    rules: &dyn RuleLookup,
    level: u8,
    request: ImprovementRequest,
) -> Result<Character, DomainError> {
    let class = class_of(character, rules)?;
    if level > character.level || !class.is_asi_level(level) {
        return Err(DomainError::invalid_choice(format!(
            "No ability score improvement at level {level}"
        )));
    }
    if character.asi_choices.contains_key(&level) {
        return Err(DomainError::invalid_choice(format!(
            "The level {level} improvement was already taken"
        )));
    }

    let mut next = character.clone();
    let choice = match request {
        ImprovementRequest::Abilities(increases) => {
            if increases.values().any(|&n| n <= 0) || increases.values().sum::<i32>() != ASI_POINTS {
                return Err(DomainError::invalid_choice(format!(
                    "Increases must be positive and total {ASI_POINTS}"
                )));
            }
            for (&ability, &increase) in &increases {
                if next.abilities.score(ability) + increase > ABILITY_SCORE_CAP {
                    return Err(DomainError::invalid_choice(format!(
                        "{ability} cannot exceed {ABILITY_SCORE_CAP}"
                    )));
                }
            }
            AsiChoice::Abilities { increases }
        }
        ImprovementRequest::Feat(slug) => {
            let feat = rules
                .feat(&slug)
                .ok_or_else(|| DomainError::invalid_choice(format!("Unknown feat '{slug}'")))?;
            if next.selected_feats.contains(&slug) {
                return Err(DomainError::invalid_choice(format!("'{slug}' is already taken")));
            }
            let increases = feat
                .ability_increases
                .iter()
                .map(|(&ability, &increase)| {
                    let room = (ABILITY_SCORE_CAP - next.abilities.score(ability)).max(0);
                    (ability, increase.min(room))
                })
                .filter(|&(_, applied)| applied > 0)
                .collect();
            next.selected_feats.push(slug.clone());
            next.features.push(FeatureEntry::new(&feat.name, FEAT_SOURCE, level));
            AsiChoice::Feat { slug, increases }
        }
    };

    let mut con_delta = 0;
    for (&ability, &increase) in choice.increases() {
        let delta = next.abilities.adjust(ability, increase);
        if ability == Ability::Constitution {
            con_delta += delta;
        }
    }
    apply_constitution_change(&mut next, con_delta);
    next.asi_choices.insert(level, choice);

    refresh_derived(&mut next, rules);
    debug!(character_id = %next.id, level, "Applied ability score improvement");
    Ok(next)
}
