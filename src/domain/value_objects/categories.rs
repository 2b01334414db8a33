//! Closed category sets used by content records and step filters

use serde::{Deserialize, Serialize};

/// Feat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatCategory {
    Class,
    General,
    Skill,
}

impl FeatCategory {
    pub const ALL: [FeatCategory; 3] = [Self::Class, Self::General, Self::Skill];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::General => "General",
            Self::Skill => "Skill",
        }
    }
}

/// Spellcasting tradition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tradition {
    Arcane,
    Divine,
    Primal,
    Occult,
}

impl Tradition {
    pub const ALL: [Tradition; 4] = [Self::Arcane, Self::Divine, Self::Primal, Self::Occult];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Arcane => "Arcane",
            Self::Divine => "Divine",
            Self::Primal => "Primal",
            Self::Occult => "Occult",
        }
    }
}

/// Equipment sub-catalog an item was picked from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Weapon,
    Armor,
    Gear,
    MagicItem,
}

impl EquipmentCategory {
    /// Sub-catalogs in the order the equipment step lists them
    pub const ALL: [EquipmentCategory; 4] =
        [Self::Weapon, Self::Armor, Self::Gear, Self::MagicItem];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::Gear => "Gear",
            Self::MagicItem => "Magic",
        }
    }
}
