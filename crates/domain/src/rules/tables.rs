//! Standard progression tables used by the built-in rule set.
//!
//! Every table has one row per class level, 1 through 20.

use crate::entities::SPELL_LEVELS;

pub const MAX_LEVEL: u8 = 20;

/// Proficiency bonus by character level.
pub fn proficiency_bonus_table() -> Vec<i32> {
    (1..=i32::from(MAX_LEVEL)).map(|level| 2 + (level - 1) / 4).collect()
}

fn expand(rows: &[&[u8]]) -> Vec<[u8; SPELL_LEVELS]> {
    rows.iter()
        .map(|row| {
            let mut slots = [0; SPELL_LEVELS];
            for (slot, &count) in slots.iter_mut().zip(row.iter()) {
                *slot = count;
            }
            slots
        })
        .collect()
}

pub fn full_caster_slots() -> Vec<[u8; SPELL_LEVELS]> {
    expand(&[
        &[2],
        &[3],
        &[4, 2],
        &[4, 3],
        &[4, 3, 2],
        &[4, 3, 3],
        &[4, 3, 3, 1],
        &[4, 3, 3, 2],
        &[4, 3, 3, 3, 1],
        &[4, 3, 3, 3, 2],
        &[4, 3, 3, 3, 2, 1],
        &[4, 3, 3, 3, 2, 1],
        &[4, 3, 3, 3, 2, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1, 1, 1],
        &[4, 3, 3, 3, 3, 1, 1, 1, 1],
        &[4, 3, 3, 3, 3, 2, 1, 1, 1],
        &[4, 3, 3, 3, 3, 2, 2, 1, 1],
    ])
}

/// Half casters have no slots at level 1.
pub fn half_caster_slots() -> Vec<[u8; SPELL_LEVELS]> {
    expand(&[
        &[],
        &[2],
        &[3],
        &[3],
        &[4, 2],
        &[4, 2],
        &[4, 3],
        &[4, 3],
        &[4, 3, 2],
        &[4, 3, 2],
        &[4, 3, 3],
        &[4, 3, 3],
        &[4, 3, 3, 1],
        &[4, 3, 3, 1],
        &[4, 3, 3, 2],
        &[4, 3, 3, 2],
        &[4, 3, 3, 3, 1],
        &[4, 3, 3, 3, 1],
        &[4, 3, 3, 3, 2],
        &[4, 3, 3, 3, 2],
    ])
}

/// Subclass casters such as the eldritch knight, from level 3.
pub fn third_caster_slots() -> Vec<[u8; SPELL_LEVELS]> {
    expand(&[
        &[],
        &[],
        &[2],
        &[3],
        &[3],
        &[3],
        &[4, 2],
        &[4, 2],
        &[4, 2],
        &[4, 3],
        &[4, 3],
        &[4, 3],
        &[4, 3, 2],
        &[4, 3, 2],
        &[4, 3, 2],
        &[4, 3, 3],
        &[4, 3, 3],
        &[4, 3, 3],
        &[4, 3, 3, 1],
        &[4, 3, 3, 1],
    ])
}

/// Pact magic: a few slots, all of the highest available level.
pub fn pact_slots() -> Vec<[u8; SPELL_LEVELS]> {
    (1..=MAX_LEVEL)
        .map(|level| {
            let (count, slot_level) = match level {
                1 => (1, 1),
                2 => (2, 1),
                3..=4 => (2, 2),
                5..=6 => (2, 3),
                7..=8 => (2, 4),
                9..=10 => (2, 5),
                11..=16 => (3, 5),
                _ => (4, 5),
            };
            let mut slots = [0; SPELL_LEVELS];
            slots[slot_level - 1] = count;
            slots
        })
        .collect()
}

/// Cantrips known with the usual 4th/10th level growth steps.
pub fn cantrip_progression(base: u8) -> Vec<u8> {
    (1..=MAX_LEVEL)
        .map(|level| match level {
            1..=3 => base,
            4..=9 => base + 1,
            _ => base + 2,
        })
        .collect()
}

pub fn no_cantrips() -> Vec<u8> {
    vec![0; usize::from(MAX_LEVEL)]
}

pub const SORCERER_SPELLS_KNOWN: [u8; 20] = [
    2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15, 15,
];

pub const BARD_SPELLS_KNOWN: [u8; 20] = [
    4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 15, 16, 18, 19, 19, 20, 22, 22, 22,
];

pub const WARLOCK_SPELLS_KNOWN: [u8; 20] = [
    2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15,
];
