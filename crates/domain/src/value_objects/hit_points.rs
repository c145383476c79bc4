use serde::{Deserialize, Serialize};

/// Hit dice pool spent on short rests.
///
/// # Invariants
///
/// - `current <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitDice {
    current: u32,
    max: u32,
    die_type: u8,
}

impl HitDice {
    /// A full pool of `max` dice.
    pub fn full(max: u32, die_type: u8) -> Self {
        Self {
            current: max,
            max,
            die_type,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn die_type(&self) -> u8 {
        self.die_type
    }

    pub(crate) fn spend(&mut self, count: u32) {
        self.current = self.current.saturating_sub(count);
    }

    pub(crate) fn restore_all(&mut self) {
        self.current = self.max;
    }

    pub(crate) fn grow(&mut self) {
        self.max += 1;
        self.current += 1;
    }

    pub(crate) fn shrink(&mut self) {
        self.max = self.max.saturating_sub(1);
        self.current = self.current.saturating_sub(1).min(self.max);
    }
}

/// How first-level hit points were determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HpMethod {
    #[default]
    Max,
    Rolled,
}

/// Hit points gained for one level past the first, using the average roll:
/// `max(1, floor(die / 2) + 1 + CON)`.
pub fn average_hit_points_per_level(hit_die: u8, constitution_modifier: i32) -> i32 {
    (i32::from(hit_die) / 2 + 1 + constitution_modifier).max(1)
}
