//! Rests and spell slot consumption.
//!
//! None of these touch inputs of the derived values, so they do not need
//! the rule set.

use tracing::debug;

use crate::aggregates::Character;
use crate::error::DomainError;
use crate::events::{LongRestOutcome, ShortRestOutcome, SpellSlotOutcome};
use crate::value_objects::Ability;

/// Spend hit dice to recover hit points.
///
/// Each die heals `max(1, roll + CON)`; the total never exceeds max hit
/// points. `dice` must be between 1 and the hit dice remaining, otherwise
/// [`DomainError::InvalidRestRequest`] is returned and nothing changes.
pub fn short_rest<F>(
    character: &Character,
    dice: u32,
    mut roll_dice: F,
) -> Result<(Character, ShortRestOutcome), DomainError>
where
    F: FnMut(u32, u32) -> Vec<u32>,
{
    let available = character.hit_dice.current();
    if dice == 0 || dice > available {
        return Err(DomainError::invalid_rest_request(dice, available));
    }

    let sides = u32::from(character.hit_dice.die_type());
    let con = character.abilities.modifier(Ability::Constitution);
    let mut rolls = roll_dice(dice, sides);
    rolls.truncate(usize::try_from(dice).unwrap_or(usize::MAX));
    // Missing rolls count as the minimum
    rolls.resize(usize::try_from(dice).unwrap_or(rolls.len()), 1);
    for roll in &mut rolls {
        *roll = (*roll).clamp(1, sides.max(1));
    }

    let healing: i32 = rolls
        .iter()
        .map(|&roll| (i32::try_from(roll).unwrap_or(1) + con).max(1))
        .sum();

    let mut next = character.clone();
    next.hit_dice.spend(dice);
    next.hit_points = (character.hit_points + healing).min(character.max_hit_points);
    let recovered = next.hit_points - character.hit_points;

    debug!(character_id = %next.id, dice, recovered, "Short rest");
    Ok((
        next,
        ShortRestOutcome {
            dice_spent: dice,
            rolls,
            hit_points_recovered: recovered,
        },
    ))
}

/// Restore hit points, hit dice, and spell slots. Idempotent.
pub fn long_rest(character: &Character) -> (Character, LongRestOutcome) {
    let mut next = character.clone();
    next.hit_points = next.max_hit_points;
    next.hit_dice.restore_all();
    let slots_restored = match next.spellcasting.as_mut() {
        Some(spellcasting) => {
            let used = spellcasting.total_used_slots();
            spellcasting.restore_all_slots();
            used
        }
        None => 0,
    };

    let outcome = LongRestOutcome {
        hit_points_restored: next.hit_points - character.hit_points,
        hit_dice_restored: next.hit_dice.current() - character.hit_dice.current(),
        slots_restored,
    };
    (next, outcome)
}

/// Spend one spell slot of `slot_level` (1-9).
pub fn use_spell_slot(character: &Character, slot_level: u8) -> (Character, SpellSlotOutcome) {
    let Some(spellcasting) = &character.spellcasting else {
        return (character.clone(), SpellSlotOutcome::NotASpellcaster);
    };
    if !(1..=9).contains(&slot_level) {
        return (
            character.clone(),
            SpellSlotOutcome::InvalidSlotLevel { slot_level },
        );
    }
    if spellcasting.available_slots(slot_level) == 0 {
        return (
            character.clone(),
            SpellSlotOutcome::NoSlotsRemaining { slot_level },
        );
    }

    let mut next = character.clone();
    let remaining = match next.spellcasting.as_mut() {
        Some(spellcasting) => {
            spellcasting.use_slot(slot_level);
            spellcasting.available_slots(slot_level)
        }
        None => return (character.clone(), SpellSlotOutcome::NotASpellcaster),
    };
    (
        next,
        SpellSlotOutcome::Used {
            slot_level,
            remaining,
        },
    )
}
