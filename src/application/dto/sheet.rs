//! Character sheet - read-only projection shown next to every step

use serde::Serialize;

use crate::domain::entities::Character;
use crate::domain::services::{ability_modifier, format_modifier};
use crate::domain::value_objects::{AbilityId, EquipmentCategory};

pub const NOT_ENTERED: &str = "Not entered";
pub const NOT_SELECTED: &str = "Not selected";

#[derive(Debug, Clone, Serialize)]
pub struct SheetAbility {
    pub id: AbilityId,
    pub abbreviation: String,
    pub score: i32,
    pub modifier: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetItem {
    pub name: String,
    pub category: EquipmentCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSpell {
    pub name: String,
    pub rank: u8,
}

/// Placeholders are filled in for unset fields; list sections are empty
/// vectors rather than absent.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    pub name: String,
    pub level: u8,
    pub ancestry: String,
    pub heritage: Option<String>,
    pub background: String,
    pub class: String,
    pub hp: i32,
    pub ac: i32,
    pub speed: i32,
    pub abilities: Vec<SheetAbility>,
    pub feats: Vec<String>,
    pub spells: Vec<SheetSpell>,
    pub equipment: Vec<SheetItem>,
}

impl CharacterSheet {
    pub fn from_character(character: &Character) -> Self {
        let derived = character.derived();
        let or_placeholder =
            |value: Option<&String>| value.cloned().unwrap_or_else(|| NOT_SELECTED.to_string());

        Self {
            name: if character.name().is_empty() {
                NOT_ENTERED.to_string()
            } else {
                character.name().to_string()
            },
            level: character.level().value(),
            ancestry: or_placeholder(character.ancestry().map(|a| &a.name)),
            heritage: character.heritage().map(|h| h.name.clone()),
            background: or_placeholder(character.background().map(|b| &b.name)),
            class: or_placeholder(character.class().map(|c| &c.name)),
            hp: derived.hp,
            ac: derived.ac,
            speed: derived.speed,
            abilities: AbilityId::ALL
                .iter()
                .map(|&id| {
                    let score = character.abilities().get(id);
                    SheetAbility {
                        id,
                        abbreviation: id.as_str().to_uppercase(),
                        score,
                        modifier: format_modifier(ability_modifier(score)),
                    }
                })
                .collect(),
            feats: character.feats().iter().map(|f| f.name.clone()).collect(),
            spells: character
                .spells()
                .iter()
                .map(|s| SheetSpell {
                    name: s.name.clone(),
                    rank: s.rank,
                })
                .collect(),
            equipment: character
                .equipment()
                .iter()
                .map(|e| SheetItem {
                    name: e.name().to_string(),
                    category: e.category(),
                })
                .collect(),
        }
    }

    /// Plain-text rendering. Empty list sections are omitted.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Name: {} Lv{}", self.name, self.level));
        match &self.heritage {
            Some(heritage) => lines.push(format!("Ancestry: {} / {}", self.ancestry, heritage)),
            None => lines.push(format!("Ancestry: {}", self.ancestry)),
        }
        lines.push(format!("Background: {}", self.background));
        lines.push(format!("Class: {}", self.class));
        lines.push(format!(
            "HP: {} | AC: {} | Speed: {}ft",
            self.hp, self.ac, self.speed
        ));
        lines.push(format!(
            "Abilities: {}",
            self.abilities
                .iter()
                .map(|a| format!("{} {}({})", a.abbreviation, a.score, a.modifier))
                .collect::<Vec<_>>()
                .join(" ")
        ));
        if !self.feats.is_empty() {
            lines.push(format!(
                "Feats ({}): {}",
                self.feats.len(),
                self.feats.join(", ")
            ));
        }
        if !self.spells.is_empty() {
            lines.push(format!(
                "Spells ({}): {}",
                self.spells.len(),
                self.spells
                    .iter()
                    .map(|s| format!("{}(R{})", s.name, s.rank))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if !self.equipment.is_empty() {
            lines.push(format!(
                "Equipment ({}): {}",
                self.equipment.len(),
                self.equipment
                    .iter()
                    .map(|e| e.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Feat, Heritage};
    use crate::domain::value_objects::FeatCategory;
    use crate::application::ports::outbound::ContentRepositoryPort;
    use crate::test_fixtures::sample_catalog;

    #[test]
    fn test_empty_character_uses_placeholders() {
        let sheet = CharacterSheet::from_character(&Character::new());
        assert_eq!(sheet.name, NOT_ENTERED);
        assert_eq!(sheet.ancestry, NOT_SELECTED);
        assert_eq!(sheet.class, NOT_SELECTED);
        assert!(sheet.heritage.is_none());
        assert!(sheet.feats.is_empty());

        let text = sheet.render_text();
        assert!(text.starts_with("Name: Not entered Lv1"));
        assert!(text.contains("HP: 0 | AC: 11 | Speed: 25ft"));
        assert!(text.contains("STR 10(+0)"));
        assert!(!text.contains("Feats"));
    }

    #[test]
    fn test_sheet_lists_selections_regardless_of_filters() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        character.set_name("Valeros");
        let dwarf = catalog.find_ancestry("dwarf").cloned().expect("dwarf");
        character.select_ancestry(dwarf);
        let heritage: Heritage = catalog.heritages_of("dwarf")[0].clone();
        character.select_heritage(heritage.clone()).expect("matching heritage");
        character.set_feat(
            Feat {
                name: "Toughness".to_string(),
                alt_name: String::new(),
                level: 1,
                category: FeatCategory::General,
                class: None,
                description: String::new(),
            },
            true,
        );

        let sheet = CharacterSheet::from_character(&character);
        assert_eq!(sheet.heritage.as_deref(), Some(heritage.name.as_str()));
        let text = sheet.render_text();
        assert!(text.contains(&format!("Ancestry: Dwarf / {}", heritage.name)));
        assert!(text.contains("Feats (1): Toughness"));
    }
}
