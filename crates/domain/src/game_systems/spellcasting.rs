//! Spellcasting derivation and slot-table synchronisation.

use tracing::{debug, warn};

use crate::aggregates::Character;
use crate::entities::{Spellcasting, SpellcastingType};
use crate::rules::{ClassRecord, ClassSpellcasting, RuleLookup};
use crate::value_objects::{AbilityScores, SpellSelection};

/// Keep selections naming a known spell of the right kind (cantrip or
/// levelled), dropping duplicates.
fn valid_spells(
    rules: &dyn RuleLookup,
    slugs: &[String],
    cantrips: bool,
    list: &'static str,
) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(slugs.len());
    for slug in slugs {
        match rules.spell(slug) {
            Some(spell) if (spell.level == 0) == cantrips => {
                if !kept.contains(slug) {
                    kept.push(slug.clone());
                }
            }
            Some(_) => warn!(slug = %slug, list, "Spell has the wrong level for this list"),
            None => warn!(slug = %slug, list, "Unknown spell, skipping"),
        }
    }
    kept
}

fn limit(mut spells: Vec<String>, max: usize, list: &'static str) -> Vec<String> {
    if spells.len() > max {
        debug!(list, max, dropped = spells.len() - max, "Truncating spell list");
        spells.truncate(max);
    }
    spells
}

/// Build the spellcasting block for a class at `level`.
///
/// Returns `None` when the class has no slots and no cantrips at that level.
pub(crate) fn derive_spellcasting(
    class: &ClassRecord,
    abilities: &AbilityScores,
    level: u8,
    selection: &SpellSelection,
    rules: &dyn RuleLookup,
) -> Option<Spellcasting> {
    let table = class.spellcasting.as_ref()?;
    if !class.casts_at(level) {
        return None;
    }

    let cantrip_limit = usize::from(table.cantrips_at(level));
    let cantrips = limit(
        valid_spells(rules, &selection.cantrips, true, "cantrips"),
        cantrip_limit,
        "cantrips",
    );
    if cantrips.len() < cantrip_limit {
        warn!(
            class = %class.slug,
            chosen = cantrips.len(),
            allowed = cantrip_limit,
            "Fewer cantrips chosen than the class allows"
        );
    }

    let modifier = abilities.modifier(table.ability);
    let max_prepared = table.max_prepared(level, modifier);
    let spellcasting = Spellcasting::new(table.ability, table.spellcasting_type, table.slots_at(level))
        .with_cantrips(cantrips);

    let spellcasting = match table.spellcasting_type {
        SpellcastingType::Known => {
            let known = valid_spells(rules, &selection.known, false, "known");
            let known = match table.spells_known_at(level) {
                Some(max) => limit(known, usize::from(max), "known"),
                None => known,
            };
            spellcasting.with_spells_known(known)
        }
        SpellcastingType::Prepared => {
            let prepared = valid_spells(rules, &selection.prepared, false, "prepared");
            spellcasting.with_prepared(limit(prepared, max_prepared, "prepared"))
        }
        SpellcastingType::Wizard => {
            let spellbook = valid_spells(rules, &selection.spellbook, false, "spellbook");
            let prepared: Vec<String> = valid_spells(rules, &selection.prepared, false, "prepared")
                .into_iter()
                .filter(|slug| spellbook.contains(slug))
                .collect();
            spellcasting
                .with_spellbook(spellbook)
                .with_prepared(limit(prepared, max_prepared, "prepared"))
        }
    };

    Some(spellcasting)
}

fn empty_block(table: &ClassSpellcasting, level: u8) -> Spellcasting {
    Spellcasting::new(table.ability, table.spellcasting_type, table.slots_at(level))
}

/// Match the spellcasting block to the class tables at the character's
/// current level: update slots, create the block the first time the class
/// casts, or drop it below that level. Used slots are left alone except for
/// clamping.
pub(crate) fn sync_spellcasting(character: &mut Character, class: &ClassRecord) {
    let level = character.level;
    match (&class.spellcasting, class.casts_at(level)) {
        (Some(table), true) => match character.spellcasting.as_mut() {
            Some(existing) => existing.set_spell_slots(table.slots_at(level)),
            None => {
                debug!(character_id = %character.id, level, "Class gains spellcasting");
                character.spellcasting = Some(empty_block(table, level));
            }
        },
        _ => {
            if character.spellcasting.take().is_some() {
                debug!(character_id = %character.id, level, "Class loses spellcasting");
            }
        }
    }
}
