//! Skills, saving throws, and the values derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ability::{Ability, AbilityScores};
use crate::error::DomainError;

/// The eighteen skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    /// The ability a check with this skill uses.
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    /// Accepts "Sleight of Hand", "sleight-of-hand", and "sleightOfHand" alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Skill::ALL
            .iter()
            .find(|skill| {
                skill
                    .display_name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(wanted.chars())
            })
            .copied()
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

/// A character's standing in one skill.
///
/// `value` is always `modifier + (proficient ? (expertise ? 2 : 1) * PB : 0)`
/// plus any overlay bonus; it is rewritten by [`SkillEntry::recompute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    proficient: bool,
    expertise: bool,
    value: i32,
}

impl SkillEntry {
    /// Expertise without proficiency is dropped.
    pub fn new(proficient: bool, expertise: bool) -> Self {
        Self {
            proficient,
            expertise: proficient && expertise,
            value: 0,
        }
    }

    pub fn proficient(&self) -> bool {
        self.proficient
    }

    pub fn expertise(&self) -> bool {
        self.expertise
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub(crate) fn recompute(&mut self, modifier: i32, proficiency_bonus: i32, overlay: i32) {
        let multiplier = match (self.proficient, self.expertise) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        };
        self.value = modifier + multiplier * proficiency_bonus + overlay;
    }
}

/// A saving throw: ability modifier plus proficiency when proficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingThrow {
    proficient: bool,
    value: i32,
}

impl SavingThrow {
    pub fn new(proficient: bool) -> Self {
        Self {
            proficient,
            value: 0,
        }
    }

    pub fn proficient(&self) -> bool {
        self.proficient
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub(crate) fn recompute(&mut self, modifier: i32, proficiency_bonus: i32) {
        self.value = modifier + if self.proficient { proficiency_bonus } else { 0 };
    }
}

/// A class feature that adds a second ability's modifier to some skills,
/// e.g. a divine order adding Wisdom to Arcana and Religion checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillOverlay {
    /// Feature that grants the overlay
    pub source: String,
    pub ability: Ability,
    pub skills: Vec<Skill>,
    /// Floor for the added bonus
    #[serde(default)]
    pub minimum: i32,
}

impl SkillOverlay {
    /// Bonus this overlay adds to `skill`, or 0 if the skill is not covered.
    pub fn bonus_for(&self, skill: Skill, abilities: &AbilityScores) -> i32 {
        if self.skills.contains(&skill) {
            abilities.modifier(self.ability).max(self.minimum)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn skill_ability_mapping() {
        assert_eq!(Skill::Athletics.ability(), Ability::Strength);
        assert_eq!(Skill::Stealth.ability(), Ability::Dexterity);
        assert_eq!(Skill::Arcana.ability(), Ability::Intelligence);
        assert_eq!(Skill::Perception.ability(), Ability::Wisdom);
        assert_eq!(Skill::Persuasion.ability(), Ability::Charisma);
    }

    #[test]
    fn parse_is_lenient_about_spacing_and_case() {
        assert_eq!("Sleight of Hand".parse::<Skill>().unwrap(), Skill::SleightOfHand);
        assert_eq!("animal-handling".parse::<Skill>().unwrap(), Skill::AnimalHandling);
        assert_eq!("sleightOfHand".parse::<Skill>().unwrap(), Skill::SleightOfHand);
        assert!("Basket Weaving".parse::<Skill>().is_err());
    }

    #[test]
    fn skill_value_with_proficiency_levels() {
        // DEX mod +2, proficiency +3
        let mut none = SkillEntry::new(false, false);
        none.recompute(2, 3, 0);
        assert_eq!(none.value(), 2);

        let mut proficient = SkillEntry::new(true, false);
        proficient.recompute(2, 3, 0);
        assert_eq!(proficient.value(), 5);

        let mut expert = SkillEntry::new(true, true);
        expert.recompute(2, 3, 0);
        assert_eq!(expert.value(), 8);
    }

    #[test]
    fn expertise_requires_proficiency() {
        let entry = SkillEntry::new(false, true);
        assert!(!entry.expertise());
    }

    #[test]
    fn saving_throw_value() {
        let mut save = SavingThrow::new(true);
        save.recompute(1, 2);
        assert_eq!(save.value(), 3);

        let mut save = SavingThrow::new(false);
        save.recompute(-1, 2);
        assert_eq!(save.value(), -1);
    }

    #[test]
    fn overlay_applies_minimum_only_to_listed_skills() {
        let mut raw = BTreeMap::new();
        raw.insert(Ability::Wisdom, 10);
        let abilities = AbilityScores::from_scores(&raw);
        let overlay = SkillOverlay {
            source: "Thaumaturge".to_string(),
            ability: Ability::Wisdom,
            skills: vec![Skill::Arcana, Skill::Religion],
            minimum: 1,
        };

        assert_eq!(overlay.bonus_for(Skill::Arcana, &abilities), 1);
        assert_eq!(overlay.bonus_for(Skill::Religion, &abilities), 1);
        assert_eq!(overlay.bonus_for(Skill::History, &abilities), 0);
    }
}
