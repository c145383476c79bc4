//! Domain entities - the pieces a character owns

mod character_content;

pub use character_content::{
    AsiChoice, FeatureEntry, Personality, Spellcasting, SpellcastingType, SPELL_LEVELS,
};
