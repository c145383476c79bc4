//! Aggregates - consistency boundaries owned by storage

pub mod character;

pub use character::{Character, MAX_EQUIPPED_WEAPONS};
