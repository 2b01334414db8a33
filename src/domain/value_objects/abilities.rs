//! Ability scores and character level

use serde::{Deserialize, Serialize};

/// Lowest score an ability can be lowered to
pub const ABILITY_MIN: i32 = 8;
/// Highest score an ability can be raised to
pub const ABILITY_MAX: i32 = 18;
/// Score every ability starts at
pub const ABILITY_DEFAULT: i32 = 10;
/// One boost or flaw moves a score by this much
pub const ABILITY_STEP: i32 = 2;

/// The six ability identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityId {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl AbilityId {
    pub const ALL: [AbilityId; 6] = [
        AbilityId::Str,
        AbilityId::Dex,
        AbilityId::Con,
        AbilityId::Int,
        AbilityId::Wis,
        AbilityId::Cha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }
}

/// Direction of a single ability boost control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Increase,
    Decrease,
}

/// Six ability scores, each kept within [`ABILITY_MIN`, `ABILITY_MAX`]
///
/// Fields are private so every write goes through the clamping setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    strength: i32,
    #[serde(rename = "dex")]
    dexterity: i32,
    #[serde(rename = "con")]
    constitution: i32,
    #[serde(rename = "int")]
    intelligence: i32,
    #[serde(rename = "wis")]
    wisdom: i32,
    #[serde(rename = "cha")]
    charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: ABILITY_DEFAULT,
            dexterity: ABILITY_DEFAULT,
            constitution: ABILITY_DEFAULT,
            intelligence: ABILITY_DEFAULT,
            wisdom: ABILITY_DEFAULT,
            charisma: ABILITY_DEFAULT,
        }
    }
}

impl AbilityScores {
    pub fn get(&self, id: AbilityId) -> i32 {
        match id {
            AbilityId::Str => self.strength,
            AbilityId::Dex => self.dexterity,
            AbilityId::Con => self.constitution,
            AbilityId::Int => self.intelligence,
            AbilityId::Wis => self.wisdom,
            AbilityId::Cha => self.charisma,
        }
    }

    /// Set a score, clamping it into range. Returns the stored value.
    pub fn set(&mut self, id: AbilityId, value: i32) -> i32 {
        let value = value.clamp(ABILITY_MIN, ABILITY_MAX);
        let slot = match id {
            AbilityId::Str => &mut self.strength,
            AbilityId::Dex => &mut self.dexterity,
            AbilityId::Con => &mut self.constitution,
            AbilityId::Int => &mut self.intelligence,
            AbilityId::Wis => &mut self.wisdom,
            AbilityId::Cha => &mut self.charisma,
        };
        *slot = value;
        value
    }

    /// Apply one boost or flaw of [`ABILITY_STEP`]
    pub fn adjust(&mut self, id: AbilityId, direction: AdjustDirection) -> i32 {
        let delta = match direction {
            AdjustDirection::Increase => ABILITY_STEP,
            AdjustDirection::Decrease => -ABILITY_STEP,
        };
        self.set(id, self.get(id).saturating_add(delta))
    }
}

/// Character level, always within [1, 20]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    /// Build a level from arbitrary user input, clamping silently
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(Self::MIN)
    }
}
