//! Wizard Service - applies typed updates to a session and renders snapshots
//!
//! Callers hold the session registry lock for the duration of one call. No
//! method here awaits, so a commit is never interleaved with another.

mod renderers;

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::{CharacterSheet, CharacterUpdate, FilterUpdate, WizardSnapshot};
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::aggregates::WizardSession;
use crate::domain::entities::CharacterError;
use crate::domain::value_objects::{InvalidStepIndex, WizardStep};

pub use renderers::{
    render_indicator, render_step, visible_equipment, visible_feats, visible_spells,
};

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("No {kind} with id '{id}' in the catalog")]
    UnknownRecord { kind: &'static str, id: String },
    #[error("'{name}' is not offered by the {step:?} step with the current selections and filters")]
    NotOffered { step: WizardStep, name: String },
    #[error(transparent)]
    InvalidStep(#[from] InvalidStepIndex),
    #[error(transparent)]
    Character(#[from] CharacterError),
}

#[derive(Clone)]
pub struct WizardService {
    content: Arc<dyn ContentRepositoryPort>,
}

impl WizardService {
    pub fn new(content: Arc<dyn ContentRepositoryPort>) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &dyn ContentRepositoryPort {
        self.content.as_ref()
    }

    pub fn snapshot(&self, session: &WizardSession) -> WizardSnapshot {
        WizardSnapshot {
            session_id: session.id(),
            revision: session.revision(),
            indicator: render_indicator(session.engine()),
            step: render_step(
                session.current_step(),
                session.character(),
                self.content(),
                session.filters(),
            ),
            sheet: CharacterSheet::from_character(session.character()),
            portrait: session.portrait().clone(),
        }
    }

    pub fn jump_to(&self, session: &mut WizardSession, index: usize) -> Result<(), WizardError> {
        let step = session.jump_to(index)?;
        debug!(session_id = %session.id(), ?step, "Jumped to step");
        Ok(())
    }

    /// Apply one character update. Nothing is written if the update is
    /// rejected.
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    pub fn apply_update(
        &self,
        session: &mut WizardSession,
        update: CharacterUpdate,
    ) -> Result<(), WizardError> {
        let content = self.content();
        match update {
            CharacterUpdate::SetName { name } => {
                session.commit(|c| c.set_name(name));
            }
            CharacterUpdate::SetLevel { level } => {
                let clamped = session.commit(|c| c.set_level(level));
                debug!(requested = level, level = clamped.value(), "Level set");
            }
            CharacterUpdate::SelectAncestry { id } => {
                let ancestry = content
                    .find_ancestry(&id)
                    .cloned()
                    .ok_or_else(|| unknown("ancestry", &id))?;
                session.commit(|c| c.select_ancestry(ancestry));
            }
            CharacterUpdate::SelectHeritage { id } => {
                let heritage = content
                    .find_heritage(&id)
                    .cloned()
                    .ok_or_else(|| unknown("heritage", &id))?;
                session.try_commit(|c| c.select_heritage(heritage))?;
            }
            CharacterUpdate::SelectBackground { id } => {
                let background = content
                    .find_background(&id)
                    .cloned()
                    .ok_or_else(|| unknown("background", &id))?;
                session.commit(|c| c.select_background(background));
            }
            CharacterUpdate::SelectClass { id } => {
                let class = content
                    .find_class(&id)
                    .cloned()
                    .ok_or_else(|| unknown("class", &id))?;
                session.commit(|c| c.select_class(class));
            }
            CharacterUpdate::AdjustAbility { ability, direction } => {
                let score = session.commit(|c| c.adjust_ability(ability, direction));
                debug!(ability = ability.as_str(), score, "Ability adjusted");
            }
            CharacterUpdate::SetFeat { name, selected } => {
                let feat = visible_feats(session.character(), content, &session.filters().feats)
                    .into_iter()
                    .find(|f| f.name == name)
                    .cloned()
                    .ok_or_else(|| not_offered(WizardStep::Feats, name))?;
                session.commit(|c| c.set_feat(feat, selected));
            }
            CharacterUpdate::SetSpell { name, selected } => {
                let spell = visible_spells(session.character(), content, &session.filters().spells)
                    .into_iter()
                    .find(|s| s.name == name)
                    .cloned()
                    .ok_or_else(|| not_offered(WizardStep::Spells, name))?;
                session.commit(|c| c.set_spell(spell, selected));
            }
            CharacterUpdate::SetEquipment {
                category,
                name,
                selected,
            } => {
                let filter = session.filters().equipment;
                let item = visible_equipment(content, &filter)
                    .into_iter()
                    .find(|i| i.category() == category && i.name() == name)
                    .ok_or_else(|| not_offered(WizardStep::Equipment, name))?;
                session.commit(|c| c.set_equipment(item, selected));
            }
        }
        Ok(())
    }

    /// Replace one step's filter record. Selections are untouched.
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    pub fn apply_filter(&self, session: &mut WizardSession, update: FilterUpdate) {
        let level = session.character().level();
        match update {
            FilterUpdate::Feats(filter) => session.set_feat_filter(filter.sanitized()),
            FilterUpdate::Spells(filter) => session.set_spell_filter(filter.sanitized(level)),
            FilterUpdate::Equipment(filter) => session.set_equipment_filter(filter),
        }
    }
}

fn unknown(kind: &'static str, id: &str) -> WizardError {
    WizardError::UnknownRecord {
        kind,
        id: id.to_string(),
    }
}

fn not_offered(step: WizardStep, name: String) -> WizardError {
    WizardError::NotOffered { step, name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::StepView;
    use crate::domain::value_objects::{
        AbilityId, AdjustDirection, EquipmentCategory, EquipmentFilter, FeatCategory, FeatFilter,
        SessionId, SpellFilter,
    };
    use crate::test_fixtures::sample_catalog;

    fn service() -> WizardService {
        WizardService::new(Arc::new(sample_catalog()))
    }

    fn apply(service: &WizardService, session: &mut WizardSession, update: CharacterUpdate) {
        service
            .apply_update(session, update)
            .expect("update accepted");
    }

    #[test]
    fn test_scenario_hp_and_speed() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        apply(&service, &mut session, CharacterUpdate::SelectAncestry { id: "human".into() });
        apply(&service, &mut session, CharacterUpdate::SelectClass { id: "wizard".into() });
        apply(
            &service,
            &mut session,
            CharacterUpdate::AdjustAbility {
                ability: AbilityId::Con,
                direction: AdjustDirection::Increase,
            },
        );

        let snapshot = service.snapshot(&session);
        assert_eq!(snapshot.sheet.hp, 8 + 6 + 1);
        assert_eq!(snapshot.sheet.speed, 25);
    }

    #[test]
    fn test_unknown_record_is_rejected_without_change() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        let before = session.revision();
        let err = service
            .apply_update(&mut session, CharacterUpdate::SelectClass { id: "nope".into() })
            .expect_err("unknown class");
        assert!(matches!(err, WizardError::UnknownRecord { kind: "class", .. }));
        assert_eq!(session.revision(), before);
        assert!(session.character().class().is_none());
    }

    #[test]
    fn test_heritage_requires_matching_ancestry() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);

        let err = service
            .apply_update(&mut session, CharacterUpdate::SelectHeritage { id: "rock-dwarf".into() })
            .expect_err("no ancestry yet");
        assert!(matches!(
            err,
            WizardError::Character(CharacterError::AncestryRequired)
        ));

        apply(&service, &mut session, CharacterUpdate::SelectAncestry { id: "elf".into() });
        let err = service
            .apply_update(&mut session, CharacterUpdate::SelectHeritage { id: "rock-dwarf".into() })
            .expect_err("wrong ancestry");
        assert!(matches!(
            err,
            WizardError::Character(CharacterError::HeritageMismatch { .. })
        ));

        apply(&service, &mut session, CharacterUpdate::SelectAncestry { id: "dwarf".into() });
        apply(&service, &mut session, CharacterUpdate::SelectHeritage { id: "rock-dwarf".into() });
        assert_eq!(
            session.character().heritage().map(|h| h.id.as_str()),
            Some("rock-dwarf")
        );
    }

    #[test]
    fn test_stale_heritage_survives_ancestry_change() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        apply(&service, &mut session, CharacterUpdate::SelectAncestry { id: "dwarf".into() });
        apply(&service, &mut session, CharacterUpdate::SelectHeritage { id: "rock-dwarf".into() });
        apply(&service, &mut session, CharacterUpdate::SelectAncestry { id: "elf".into() });

        assert_eq!(
            session.character().heritage().map(|h| h.ancestry.as_str()),
            Some("dwarf")
        );
    }

    #[test]
    fn test_feat_toggle_on_off_on() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        for selected in [true, false, true] {
            apply(
                &service,
                &mut session,
                CharacterUpdate::SetFeat {
                    name: "Toughness".into(),
                    selected,
                },
            );
        }
        assert_eq!(session.character().feats().len(), 1);
    }

    #[test]
    fn test_hidden_feat_cannot_be_toggled() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        apply(
            &service,
            &mut session,
            CharacterUpdate::SetFeat {
                name: "Toughness".into(),
                selected: true,
            },
        );

        service.apply_filter(
            &mut session,
            FilterUpdate::Feats(FeatFilter {
                category: Some(FeatCategory::Skill),
                max_level: None,
            }),
        );
        let err = service
            .apply_update(
                &mut session,
                CharacterUpdate::SetFeat {
                    name: "Toughness".into(),
                    selected: false,
                },
            )
            .expect_err("hidden by filter");
        assert!(matches!(err, WizardError::NotOffered { .. }));

        // still on the sheet
        let snapshot = service.snapshot(&session);
        assert_eq!(snapshot.sheet.feats, vec!["Toughness".to_string()]);
    }

    #[test]
    fn test_class_feat_needs_matching_class() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        let power_attack = CharacterUpdate::SetFeat {
            name: "Power Attack".into(),
            selected: true,
        };
        assert!(service
            .apply_update(&mut session, power_attack.clone())
            .is_err());

        apply(&service, &mut session, CharacterUpdate::SelectClass { id: "fighter".into() });
        apply(&service, &mut session, power_attack);
        assert!(session.character().has_feat("Power Attack"));
    }

    #[test]
    fn test_spells_rejected_for_non_casters() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        apply(&service, &mut session, CharacterUpdate::SelectClass { id: "fighter".into() });
        let err = service
            .apply_update(
                &mut session,
                CharacterUpdate::SetSpell {
                    name: "Shield".into(),
                    selected: true,
                },
            )
            .expect_err("fighter casts nothing");
        assert!(matches!(
            err,
            WizardError::NotOffered {
                step: WizardStep::Spells,
                ..
            }
        ));

        apply(&service, &mut session, CharacterUpdate::SelectClass { id: "wizard".into() });
        apply(
            &service,
            &mut session,
            CharacterUpdate::SetSpell {
                name: "Shield".into(),
                selected: true,
            },
        );
        assert!(session.character().has_spell("Shield"));
    }

    #[test]
    fn test_spell_filter_rank_is_clamped_to_level() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        service.apply_filter(
            &mut session,
            FilterUpdate::Spells(SpellFilter {
                rank: Some(9),
                tradition: None,
            }),
        );
        assert_eq!(session.filters().spells.rank, Some(1));
    }

    #[test]
    fn test_equipment_requires_matching_category() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        let err = service
            .apply_update(
                &mut session,
                CharacterUpdate::SetEquipment {
                    category: EquipmentCategory::Armor,
                    name: "Longsword".into(),
                    selected: true,
                },
            )
            .expect_err("longsword is a weapon");
        assert!(matches!(err, WizardError::NotOffered { .. }));

        apply(
            &service,
            &mut session,
            CharacterUpdate::SetEquipment {
                category: EquipmentCategory::Weapon,
                name: "Longsword".into(),
                selected: true,
            },
        );

        service.apply_filter(
            &mut session,
            FilterUpdate::Equipment(EquipmentFilter {
                category: Some(EquipmentCategory::Gear),
            }),
        );
        assert!(session.character().has_equipment("Longsword"));
    }

    #[test]
    fn test_navigation_snapshot_follows_current_step() {
        let service = service();
        let mut session = WizardSession::new(SessionId::new(), 50);
        assert!(!session.retreat());

        service.jump_to(&mut session, 9).expect("valid");
        assert!(!session.advance());
        let snapshot = service.snapshot(&session);
        assert!(matches!(snapshot.step, StepView::Complete { .. }));
        assert!(!snapshot.indicator.can_advance);

        assert!(matches!(
            service.jump_to(&mut session, 10),
            Err(WizardError::InvalidStep(_))
        ));
    }
}
