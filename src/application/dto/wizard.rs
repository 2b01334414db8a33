//! Wizard view models and typed update requests

use serde::{Deserialize, Serialize};

use crate::application::dto::CharacterSheet;
use crate::domain::value_objects::{
    saturating_i64, AbilityId, AdjustDirection, EquipmentCategory, EquipmentFilter, FeatCategory,
    FeatFilter, PortraitState, SessionId, SpellFilter, Tradition, WizardStep,
};

// ============================================================================
// Step indicator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Done,
    Active,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepDot {
    pub index: usize,
    pub step: WizardStep,
    pub title: &'static str,
    pub state: StepState,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepIndicator {
    pub current: usize,
    pub steps: Vec<StepDot>,
    pub can_retreat: bool,
    pub can_advance: bool,
}

// ============================================================================
// Step views
// ============================================================================

/// A single-select card (ancestry, heritage, background, class)
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub alt_name: String,
    /// Short stat line, e.g. "HP 8 / Speed 25"
    pub detail: String,
    pub description: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbilityRow {
    pub id: AbilityId,
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub score: i32,
    pub modifier: String,
    pub can_increase: bool,
    pub can_decrease: bool,
}

/// A multi-select checklist row (feat, spell, equipment item)
#[derive(Debug, Clone, Serialize)]
pub struct OptionRow {
    pub name: String,
    pub alt_name: String,
    pub badges: Vec<String>,
    pub description: String,
    pub selected: bool,
}

/// Rendered content of the current step
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepView {
    Name {
        title: String,
        name: String,
        level: u8,
    },
    Cards {
        title: String,
        cards: Vec<Card>,
    },
    /// A prerequisite is missing; no choices are offered
    Blocked {
        title: String,
        message: String,
    },
    Abilities {
        title: String,
        hint: String,
        rows: Vec<AbilityRow>,
    },
    Feats {
        title: String,
        filter: FeatFilter,
        categories: Vec<FeatCategory>,
        max_level: u8,
        rows: Vec<OptionRow>,
    },
    Spells {
        title: String,
        filter: SpellFilter,
        rank_options: Vec<u8>,
        traditions: Vec<Tradition>,
        rows: Vec<OptionRow>,
    },
    /// Step does not apply to the current character
    Notice {
        title: String,
        message: String,
    },
    Equipment {
        title: String,
        filter: EquipmentFilter,
        categories: Vec<EquipmentCategory>,
        rows: Vec<OptionRow>,
    },
    Complete {
        title: String,
        message: String,
        actions: Vec<String>,
    },
}

// ============================================================================
// Requests
// ============================================================================

/// One typed character update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CharacterUpdate {
    SetName { name: String },
    SetLevel {
        #[serde(deserialize_with = "saturating_i64")]
        level: i64,
    },
    SelectAncestry { id: String },
    SelectHeritage { id: String },
    SelectBackground { id: String },
    SelectClass { id: String },
    AdjustAbility {
        ability: AbilityId,
        direction: AdjustDirection,
    },
    SetFeat { name: String, selected: bool },
    SetSpell { name: String, selected: bool },
    SetEquipment {
        category: EquipmentCategory,
        name: String,
        selected: bool,
    },
}

/// Replace the filter record of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FilterUpdate {
    Feats(FeatFilter),
    Spells(SpellFilter),
    Equipment(EquipmentFilter),
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything a client needs to redraw the wizard after any transition or
/// update
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
    pub session_id: SessionId,
    pub revision: u64,
    pub indicator: StepIndicator,
    pub step: StepView,
    pub sheet: CharacterSheet,
    pub portrait: PortraitState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_update_parses_tagged_json() {
        let update: CharacterUpdate = serde_json::from_value(serde_json::json!({
            "op": "set_equipment",
            "category": "magic_item",
            "name": "Bag of Holding",
            "selected": true
        }))
        .expect("valid update");
        assert_eq!(
            update,
            CharacterUpdate::SetEquipment {
                category: EquipmentCategory::MagicItem,
                name: "Bag of Holding".to_string(),
                selected: true,
            }
        );

        let update: CharacterUpdate = serde_json::from_value(serde_json::json!({
            "op": "adjust_ability",
            "ability": "con",
            "direction": "increase"
        }))
        .expect("valid update");
        assert!(matches!(
            update,
            CharacterUpdate::AdjustAbility {
                ability: AbilityId::Con,
                direction: AdjustDirection::Increase
            }
        ));
    }

    #[test]
    fn test_filter_update_defaults_missing_fields_to_all() {
        let update: FilterUpdate =
            serde_json::from_value(serde_json::json!({ "step": "feats", "category": "skill" }))
                .expect("valid filter");
        assert_eq!(
            update,
            FilterUpdate::Feats(FeatFilter {
                category: Some(FeatCategory::Skill),
                max_level: None,
            })
        );
    }

    #[test]
    fn test_set_level_accepts_any_number() {
        let update: CharacterUpdate =
            serde_json::from_value(serde_json::json!({ "op": "set_level", "level": 1e20 }))
                .expect("valid update");
        assert_eq!(update, CharacterUpdate::SetLevel { level: i64::MAX });

        let update: CharacterUpdate =
            serde_json::from_value(serde_json::json!({ "op": "set_level", "level": -5 }))
                .expect("valid update");
        assert_eq!(update, CharacterUpdate::SetLevel { level: -5 });
    }
}
