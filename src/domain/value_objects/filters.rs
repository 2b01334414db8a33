//! Per-step filter records
//!
//! Filters belong to the wizard session, not to the character. Changing a
//! filter only changes which candidates a step offers; already chosen feats,
//! spells and items are never affected.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::optional_saturating_i64;
use super::{EquipmentCategory, FeatCategory, Level, Tradition};

/// Highest spell rank any character can reach
pub const MAX_SPELL_RANK: u8 = 10;

/// Highest spell rank offered at a given level: `min(10, ceil(level / 2))`
pub fn max_spell_rank(level: Level) -> u8 {
    level.value().div_ceil(2).min(MAX_SPELL_RANK)
}

/// Feat step filter. `None` means "all" / "follow the character level".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatFilter {
    #[serde(default)]
    pub category: Option<FeatCategory>,
    #[serde(default, deserialize_with = "clamped_max_level")]
    pub max_level: Option<u8>,
}

impl FeatFilter {
    /// Normalize user input: an explicit max level is clamped to [1, 20]
    pub fn sanitized(self) -> Self {
        Self {
            category: self.category,
            max_level: self
                .max_level
                .map(|level| Level::clamped(i64::from(level)).value()),
        }
    }

    pub fn effective_max_level(&self, character_level: Level) -> u8 {
        self.max_level.unwrap_or(character_level.value())
    }
}

/// Spell step filter. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellFilter {
    #[serde(default, deserialize_with = "clamped_rank")]
    pub rank: Option<u8>,
    #[serde(default)]
    pub tradition: Option<Tradition>,
}

impl SpellFilter {
    /// Clamp a requested rank to what the character level offers
    pub fn sanitized(self, level: Level) -> Self {
        Self {
            rank: self.rank.map(|rank| rank.min(max_spell_rank(level))),
            tradition: self.tradition,
        }
    }

    /// The rank constraint actually applied. A stored rank that a later level
    /// change pushed out of range is treated as "all".
    pub fn effective_rank(&self, level: Level) -> Option<u8> {
        self.rank.filter(|rank| *rank <= max_spell_rank(level))
    }
}

/// Any number is accepted as a feat level cap and clamped to [1, 20]
fn clamped_max_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_saturating_i64(deserializer)?.map(|level| Level::clamped(level).value()))
}

/// Any number is accepted as a spell rank; negatives mean cantrips (rank 0)
fn clamped_rank<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_saturating_i64(deserializer)?
        .map(|rank| rank.clamp(0, i64::from(MAX_SPELL_RANK)) as u8))
}

/// Equipment step filter. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentFilter {
    #[serde(default)]
    pub category: Option<EquipmentCategory>,
}

/// All filter state owned by one wizard session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepFilters {
    pub feats: FeatFilter,
    pub spells: SpellFilter,
    pub equipment: EquipmentFilter,
}
