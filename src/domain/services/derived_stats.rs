//! Derived character statistics
//!
//! HP, AC and speed are never chosen directly. They are a pure function of
//! ancestry, class, Constitution, Dexterity and level.

use serde::Serialize;

use crate::domain::entities::{Ancestry, CharacterClass};
use crate::domain::value_objects::{AbilityId, AbilityScores, Level};

/// Speed used when no ancestry is selected
pub const DEFAULT_SPEED: i32 = 25;

/// `floor((score - 10) / 2)`
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Signed modifier text, e.g. `+2` or `-1`
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    pub hp: i32,
    pub ac: i32,
    pub speed: i32,
}

impl DerivedStats {
    /// Simplified model: armor is never added to AC.
    pub fn compute(
        ancestry: Option<&Ancestry>,
        class: Option<&CharacterClass>,
        abilities: &AbilityScores,
        level: Level,
    ) -> Self {
        let level = i32::from(level.value());
        let ancestry_hp = ancestry.map_or(0, |a| a.hp);
        let class_hp = class.map_or(0, |c| c.hp);
        let con = ability_modifier(abilities.get(AbilityId::Con));
        let dex = ability_modifier(abilities.get(AbilityId::Dex));

        Self {
            hp: ancestry_hp + (class_hp + con) * level,
            ac: 10 + dex + level,
            speed: ancestry.map_or(DEFAULT_SPEED, |a| a.speed),
        }
    }
}
