//! The six ability scores and their derived modifiers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Highest score an ability improvement may raise a score to.
pub const ABILITY_SCORE_CAP: i32 = 20;

/// Score assumed for an ability the creation input leaves out.
pub const DEFAULT_ABILITY_SCORE: i32 = 10;

/// One of the six core abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Strength),
            "dex" | "dexterity" => Ok(Ability::Dexterity),
            "con" | "constitution" => Ok(Ability::Constitution),
            "int" | "intelligence" => Ok(Ability::Intelligence),
            "wis" | "wisdom" => Ok(Ability::Wisdom),
            "cha" | "charisma" => Ok(Ability::Charisma),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

/// Modifier for an ability score: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    // Rust's / rounds toward zero, so odd scores below 10 need euclidean division
    (score - 10).div_euclid(2)
}

/// A score together with its modifier.
///
/// The modifier is never stored independently: it is computed on construction
/// and recomputed on deserialization, whatever the payload claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AbilityScoreData")]
pub struct AbilityScore {
    score: i32,
    modifier: i32,
}

impl AbilityScore {
    pub fn new(score: i32) -> Self {
        Self {
            score,
            modifier: ability_modifier(score),
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::new(DEFAULT_ABILITY_SCORE)
    }
}

#[derive(Deserialize)]
struct AbilityScoreData {
    score: i32,
}

impl From<AbilityScoreData> for AbilityScore {
    fn from(data: AbilityScoreData) -> Self {
        Self::new(data.score)
    }
}

/// All six ability scores of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityScores(BTreeMap<Ability, AbilityScore>);

impl AbilityScores {
    /// Build from raw scores; abilities not present default to 10.
    pub fn from_scores(scores: &BTreeMap<Ability, i32>) -> Self {
        Self(
            Ability::ALL
                .iter()
                .map(|ability| {
                    let score = scores.get(ability).copied().unwrap_or(DEFAULT_ABILITY_SCORE);
                    (*ability, AbilityScore::new(score))
                })
                .collect(),
        )
    }

    pub fn get(&self, ability: Ability) -> AbilityScore {
        self.0.get(&ability).copied().unwrap_or_default()
    }

    pub fn score(&self, ability: Ability) -> i32 {
        self.get(ability).score()
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.get(ability).modifier()
    }

    pub fn set_score(&mut self, ability: Ability, score: i32) {
        self.0.insert(ability, AbilityScore::new(score));
    }

    /// Add `delta` to a score, returning the change in modifier.
    pub fn adjust(&mut self, ability: Ability, delta: i32) -> i32 {
        let before = self.get(ability);
        let after = AbilityScore::new(before.score() + delta);
        self.0.insert(ability, after);
        after.modifier() - before.modifier()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, AbilityScore)> + '_ {
        self.0.iter().map(|(a, s)| (*a, *s))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::from_scores(&BTreeMap::new())
    }
}
