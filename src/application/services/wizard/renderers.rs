//! Step renderers
//!
//! One function per wizard step. Each is a pure function of the character,
//! the content catalog and the session's filter records, so rendering never
//! mutates anything and a filter change can never drop a selection.

use crate::application::dto::{
    AbilityRow, Card, OptionRow, StepDot, StepIndicator, StepState, StepView,
};
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{Character, EquipmentItem, Feat, Heritage, Spell};
use crate::domain::services::{ability_modifier, format_modifier};
use crate::domain::value_objects::{
    max_spell_rank, AbilityId, EquipmentCategory, EquipmentFilter, FeatCategory, FeatFilter,
    SpellFilter, StepEngine, StepFilters, Tradition, WizardStep, ABILITY_MAX, ABILITY_MIN,
};

pub const HERITAGE_BLOCKED_MESSAGE: &str = "Select an ancestry first.";

pub fn render_indicator(engine: &StepEngine) -> StepIndicator {
    let current = engine.index();
    let steps = WizardStep::ALL
        .iter()
        .map(|&step| {
            let index = step.index();
            let state = match index.cmp(&current) {
                std::cmp::Ordering::Less => StepState::Done,
                std::cmp::Ordering::Equal => StepState::Active,
                std::cmp::Ordering::Greater => StepState::Pending,
            };
            StepDot {
                index,
                step,
                title: step.title(),
                state,
            }
        })
        .collect();

    StepIndicator {
        current,
        steps,
        can_retreat: engine.can_retreat(),
        can_advance: engine.can_advance(),
    }
}

pub fn render_step(
    step: WizardStep,
    character: &Character,
    content: &dyn ContentRepositoryPort,
    filters: &StepFilters,
) -> StepView {
    match step {
        WizardStep::NameAndLevel => StepView::Name {
            title: step.title().to_string(),
            name: character.name().to_string(),
            level: character.level().value(),
        },
        WizardStep::Ancestry => render_ancestries(character, content),
        WizardStep::Heritage => render_heritages(character, content),
        WizardStep::Background => render_backgrounds(character, content),
        WizardStep::Class => render_classes(character, content),
        WizardStep::Abilities => render_abilities(character, content),
        WizardStep::Feats => render_feats(character, content, &filters.feats),
        WizardStep::Spells => render_spells(character, content, &filters.spells),
        WizardStep::Equipment => render_equipment(character, content, &filters.equipment),
        WizardStep::Complete => StepView::Complete {
            title: step.title().to_string(),
            message: "Your character is ready. Review the sheet, then export it as JSON or \
                      generate a portrait."
                .to_string(),
            actions: vec!["export".to_string(), "portrait".to_string()],
        },
    }
}

// ============================================================================
// Candidate lists
// ============================================================================

/// Heritages offered for the current ancestry, or `None` while no ancestry
/// is selected
pub fn heritage_choices<'a>(
    character: &Character,
    content: &'a dyn ContentRepositoryPort,
) -> Option<Vec<&'a Heritage>> {
    character
        .ancestry()
        .map(|ancestry| content.heritages_of(&ancestry.id))
}

pub fn visible_feats<'a>(
    character: &Character,
    content: &'a dyn ContentRepositoryPort,
    filter: &FeatFilter,
) -> Vec<&'a Feat> {
    let max_level = filter.effective_max_level(character.level());
    let class_id = character.class().map(|c| c.id.as_str());
    content
        .feats()
        .iter()
        .filter(|f| filter.category.map_or(true, |c| f.category == c))
        .filter(|f| f.level <= max_level)
        .filter(|f| f.available_to(class_id))
        .collect()
}

/// Spells offered to the character. Empty for non-casters.
pub fn visible_spells<'a>(
    character: &Character,
    content: &'a dyn ContentRepositoryPort,
    filter: &SpellFilter,
) -> Vec<&'a Spell> {
    if !character.class().is_some_and(|c| c.spellcasting) {
        return Vec::new();
    }
    let rank = filter.effective_rank(character.level());
    content
        .spells()
        .iter()
        .filter(|s| rank.map_or(true, |r| s.rank == r))
        .filter(|s| filter.tradition.map_or(true, |t| s.traditions.contains(&t)))
        .collect()
}

pub fn visible_equipment(
    content: &dyn ContentRepositoryPort,
    filter: &EquipmentFilter,
) -> Vec<EquipmentItem> {
    content.equipment(filter.category)
}

// ============================================================================
// Single-select steps
// ============================================================================

fn render_ancestries(character: &Character, content: &dyn ContentRepositoryPort) -> StepView {
    let selected = character.ancestry().map(|a| a.id.as_str());
    let cards = content
        .ancestries()
        .iter()
        .map(|a| Card {
            id: a.id.clone(),
            name: a.name.clone(),
            alt_name: a.alt_name.clone(),
            detail: format!(
                "HP {} / Speed {}ft / Boosts: {}",
                a.hp,
                a.speed,
                a.boosts.join(", ")
            ),
            description: a.description.clone(),
            selected: selected == Some(a.id.as_str()),
        })
        .collect();
    StepView::Cards {
        title: WizardStep::Ancestry.title().to_string(),
        cards,
    }
}

fn render_heritages(character: &Character, content: &dyn ContentRepositoryPort) -> StepView {
    let (Some(ancestry), Some(choices)) = (character.ancestry(), heritage_choices(character, content))
    else {
        return StepView::Blocked {
            title: WizardStep::Heritage.title().to_string(),
            message: HERITAGE_BLOCKED_MESSAGE.to_string(),
        };
    };

    let selected = character.heritage().map(|h| h.id.as_str());
    let cards = choices
        .into_iter()
        .map(|h| Card {
            id: h.id.clone(),
            name: h.name.clone(),
            alt_name: h.alt_name.clone(),
            detail: String::new(),
            description: h.description.clone(),
            selected: selected == Some(h.id.as_str()),
        })
        .collect();
    StepView::Cards {
        title: format!("{} ({} heritages)", WizardStep::Heritage.title(), ancestry.name),
        cards,
    }
}

fn render_backgrounds(character: &Character, content: &dyn ContentRepositoryPort) -> StepView {
    let selected = character.background().map(|b| b.id.as_str());
    let cards = content
        .backgrounds()
        .iter()
        .map(|b| Card {
            id: b.id.clone(),
            name: b.name.clone(),
            alt_name: b.alt_name.clone(),
            detail: format!("Boosts: {} / Skill: {}", b.boosts.join(", "), b.skill),
            description: b.description.clone(),
            selected: selected == Some(b.id.as_str()),
        })
        .collect();
    StepView::Cards {
        title: WizardStep::Background.title().to_string(),
        cards,
    }
}

fn render_classes(character: &Character, content: &dyn ContentRepositoryPort) -> StepView {
    let selected = character.class().map(|c| c.id.as_str());
    let cards = content
        .classes()
        .iter()
        .map(|c| {
            let mut detail = format!("HP {} / Key: {}", c.hp, c.key_ability);
            if c.spellcasting {
                detail.push_str(" / Spellcasting");
            }
            Card {
                id: c.id.clone(),
                name: c.name.clone(),
                alt_name: c.alt_name.clone(),
                detail,
                description: c.description.clone(),
                selected: selected == Some(c.id.as_str()),
            }
        })
        .collect();
    StepView::Cards {
        title: WizardStep::Class.title().to_string(),
        cards,
    }
}

// ============================================================================
// Abilities
// ============================================================================

fn render_abilities(character: &Character, content: &dyn ContentRepositoryPort) -> StepView {
    let rows = AbilityId::ALL
        .iter()
        .map(|&id| {
            let score = character.abilities().get(id);
            let info = content.ability_info(id);
            AbilityRow {
                id,
                name: info
                    .map(|i| i.name.clone())
                    .unwrap_or_else(|| id.as_str().to_uppercase()),
                abbreviation: info
                    .map(|i| i.abbreviation.clone())
                    .unwrap_or_else(|| id.as_str().to_uppercase()),
                description: info.map(|i| i.description.clone()).unwrap_or_default(),
                score,
                modifier: format_modifier(ability_modifier(score)),
                can_increase: score < ABILITY_MAX,
                can_decrease: score > ABILITY_MIN,
            }
        })
        .collect();
    StepView::Abilities {
        title: WizardStep::Abilities.title().to_string(),
        hint: "Every ability starts at 10. Each boost adds +2, each flaw subtracts 2.".to_string(),
        rows,
    }
}

// ============================================================================
// Multi-select steps
// ============================================================================

fn render_feats(
    character: &Character,
    content: &dyn ContentRepositoryPort,
    filter: &FeatFilter,
) -> StepView {
    let rows = visible_feats(character, content, filter)
        .into_iter()
        .map(|f| OptionRow {
            name: f.name.clone(),
            alt_name: f.alt_name.clone(),
            badges: vec![format!("Lv{}", f.level), f.category.label().to_string()],
            description: f.description.clone(),
            selected: character.has_feat(&f.name),
        })
        .collect();
    StepView::Feats {
        title: WizardStep::Feats.title().to_string(),
        filter: *filter,
        categories: FeatCategory::ALL.to_vec(),
        max_level: filter.effective_max_level(character.level()),
        rows,
    }
}

fn render_spells(
    character: &Character,
    content: &dyn ContentRepositoryPort,
    filter: &SpellFilter,
) -> StepView {
    let title = WizardStep::Spells.title();
    let class = match character.class() {
        Some(class) if class.spellcasting => class,
        Some(class) => {
            return StepView::Notice {
                title: title.to_string(),
                message: format!(
                    "{} does not cast spells. Continue to the next step.",
                    class.name
                ),
            }
        }
        None => {
            return StepView::Notice {
                title: title.to_string(),
                message: "No class selected, so there are no spells to choose. Continue to the \
                          next step."
                    .to_string(),
            }
        }
    };

    let rows = visible_spells(character, content, filter)
        .into_iter()
        .map(|s| {
            let mut badges = vec![format!("R{}", s.rank)];
            badges.extend(s.traditions.iter().map(|t| t.label().to_string()));
            OptionRow {
                name: s.name.clone(),
                alt_name: s.alt_name.clone(),
                badges,
                description: s.description.clone(),
                selected: character.has_spell(&s.name),
            }
        })
        .collect();
    StepView::Spells {
        title: format!("{} ({})", title, class.name),
        filter: *filter,
        rank_options: (0..=max_spell_rank(character.level())).collect(),
        traditions: Tradition::ALL.to_vec(),
        rows,
    }
}

fn render_equipment(
    character: &Character,
    content: &dyn ContentRepositoryPort,
    filter: &EquipmentFilter,
) -> StepView {
    let rows = visible_equipment(content, filter)
        .into_iter()
        .map(|item| {
            let mut badges = vec![item.category().label().to_string()];
            if let Some(price) = item.price() {
                badges.push(price.to_string());
            }
            if let Some(level) = item.level() {
                badges.push(format!("Lv{}", level));
            }
            if let Some(damage) = item.damage() {
                badges.push(damage.to_string());
            }
            OptionRow {
                name: item.name().to_string(),
                alt_name: item.alt_name().to_string(),
                badges,
                description: item.description().to_string(),
                selected: character.has_equipment(item.name()),
            }
        })
        .collect();
    StepView::Equipment {
        title: WizardStep::Equipment.title().to_string(),
        filter: *filter,
        categories: EquipmentCategory::ALL.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_catalog;

    fn select_class(character: &mut Character, content: &dyn ContentRepositoryPort, id: &str) {
        let class = content.find_class(id).cloned().expect("class in catalog");
        character.select_class(class);
    }

    #[test]
    fn test_indicator_marks_done_active_pending() {
        let mut engine = StepEngine::new();
        engine.jump_to(3).expect("valid index");
        let indicator = render_indicator(&engine);

        assert_eq!(indicator.current, 3);
        assert_eq!(indicator.steps.len(), WizardStep::COUNT);
        assert_eq!(indicator.steps[2].state, StepState::Done);
        assert_eq!(indicator.steps[3].state, StepState::Active);
        assert_eq!(indicator.steps[4].state, StepState::Pending);
        assert!(indicator.can_advance && indicator.can_retreat);
    }

    #[test]
    fn test_every_step_view_carries_its_title() {
        let catalog = sample_catalog();
        let character = Character::new();
        for step in WizardStep::ALL {
            let view = render_step(step, &character, &catalog, &StepFilters::default());
            let json = serde_json::to_value(&view).expect("serialize");
            let title = json["title"].as_str().expect("title is a string");
            assert!(title.starts_with(step.title()), "{:?}: {}", step, title);
        }
    }

    #[test]
    fn test_heritage_step_is_blocked_without_ancestry() {
        let catalog = sample_catalog();
        let character = Character::new();
        let view = render_step(
            WizardStep::Heritage,
            &character,
            &catalog,
            &StepFilters::default(),
        );
        assert!(matches!(view, StepView::Blocked { .. }));
        assert!(heritage_choices(&character, &catalog).is_none());
    }

    #[test]
    fn test_heritage_choices_follow_selected_ancestry() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        character.select_ancestry(catalog.find_ancestry("elf").cloned().expect("elf"));

        let choices = heritage_choices(&character, &catalog).expect("ancestry selected");
        assert!(!choices.is_empty());
        assert!(choices.iter().all(|h| h.ancestry == "elf"));

        match render_step(
            WizardStep::Heritage,
            &character,
            &catalog,
            &StepFilters::default(),
        ) {
            StepView::Cards { cards, .. } => {
                assert_eq!(cards.len(), choices.len());
                assert!(cards.iter().all(|c| !c.selected));
            }
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_single_select_marks_exactly_one_card() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        select_class(&mut character, &catalog, "fighter");
        select_class(&mut character, &catalog, "wizard");

        match render_step(WizardStep::Class, &character, &catalog, &StepFilters::default()) {
            StepView::Cards { cards, .. } => {
                let selected: Vec<&str> = cards
                    .iter()
                    .filter(|c| c.selected)
                    .map(|c| c.id.as_str())
                    .collect();
                assert_eq!(selected, vec!["wizard"]);
            }
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_class_feats_hidden_for_other_classes() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        let filter = FeatFilter::default();

        let without_class = visible_feats(&character, &catalog, &filter);
        assert!(without_class.iter().all(|f| f.class.is_none()));

        select_class(&mut character, &catalog, "fighter");
        let fighter = visible_feats(&character, &catalog, &filter);
        assert!(fighter.iter().any(|f| f.name == "Power Attack"));
        assert!(fighter
            .iter()
            .all(|f| f.class.is_none() || f.class.as_deref() == Some("fighter")));
    }

    #[test]
    fn test_feat_max_level_defaults_to_character_level() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        select_class(&mut character, &catalog, "fighter");

        let level_one = visible_feats(&character, &catalog, &FeatFilter::default());
        assert!(level_one.iter().all(|f| f.level <= 1));

        character.set_level(20);
        let level_twenty = visible_feats(&character, &catalog, &FeatFilter::default());
        assert!(level_twenty.len() > level_one.len());

        let capped = FeatFilter {
            category: Some(FeatCategory::General),
            max_level: Some(1),
        };
        let general = visible_feats(&character, &catalog, &capped);
        assert!(general
            .iter()
            .all(|f| f.category == FeatCategory::General && f.level <= 1));
    }

    #[test]
    fn test_spell_step_is_notice_for_non_casters() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        let filters = StepFilters::default();

        let view = render_step(WizardStep::Spells, &character, &catalog, &filters);
        assert!(matches!(view, StepView::Notice { .. }));

        select_class(&mut character, &catalog, "fighter");
        let view = render_step(WizardStep::Spells, &character, &catalog, &filters);
        assert!(matches!(view, StepView::Notice { .. }));
        assert!(visible_spells(&character, &catalog, &filters.spells).is_empty());
    }

    #[test]
    fn test_spell_rank_options_follow_level() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        select_class(&mut character, &catalog, "wizard");
        character.set_level(5);

        match render_step(
            WizardStep::Spells,
            &character,
            &catalog,
            &StepFilters::default(),
        ) {
            StepView::Spells { rank_options, .. } => assert_eq!(rank_options, vec![0, 1, 2, 3]),
            other => panic!("expected spells, got {:?}", other),
        }

        let cantrips = SpellFilter {
            rank: Some(0),
            tradition: Some(Tradition::Arcane),
        };
        let spells = visible_spells(&character, &catalog, &cantrips);
        assert!(!spells.is_empty());
        assert!(spells
            .iter()
            .all(|s| s.rank == 0 && s.traditions.contains(&Tradition::Arcane)));
    }

    #[test]
    fn test_filter_does_not_drop_selections() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        let sword = catalog
            .equipment(Some(EquipmentCategory::Weapon))
            .into_iter()
            .next()
            .expect("a weapon");
        character.set_equipment(sword, true);

        let armor_only = EquipmentFilter {
            category: Some(EquipmentCategory::Armor),
        };
        let rows = visible_equipment(&catalog, &armor_only);
        assert!(rows.iter().all(|i| i.category() == EquipmentCategory::Armor));
        assert_eq!(character.equipment().len(), 1);
    }

    #[test]
    fn test_equipment_lists_all_four_catalogs_in_order() {
        let catalog = sample_catalog();
        let items = visible_equipment(&catalog, &EquipmentFilter::default());
        let mut categories: Vec<EquipmentCategory> = items.iter().map(|i| i.category()).collect();
        categories.dedup();
        assert_eq!(categories, EquipmentCategory::ALL.to_vec());
    }

    #[test]
    fn test_ability_rows_disable_controls_at_bounds() {
        let catalog = sample_catalog();
        let mut character = Character::new();
        character.set_ability(AbilityId::Str, 18);
        character.set_ability(AbilityId::Dex, 8);

        match render_step(
            WizardStep::Abilities,
            &character,
            &catalog,
            &StepFilters::default(),
        ) {
            StepView::Abilities { rows, .. } => {
                assert_eq!(rows.len(), 6);
                assert!(!rows[0].can_increase && rows[0].can_decrease);
                assert_eq!(rows[0].modifier, "+4");
                assert!(rows[1].can_increase && !rows[1].can_decrease);
                assert_eq!(rows[1].modifier, "-1");
            }
            other => panic!("expected abilities, got {:?}", other),
        }
    }
}
