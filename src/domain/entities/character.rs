//! Character entity - the character under construction
//!
//! All fields are private. Every mutator enforces its field invariant and
//! then recomputes the derived stats before returning, so a `Character` can
//! never be observed with stale HP, AC or speed.

use serde::Serialize;

use crate::domain::entities::{
    Ancestry, Background, CharacterClass, EquipmentItem, Feat, Heritage, Spell,
};
use crate::domain::services::DerivedStats;
use crate::domain::value_objects::{AbilityId, AbilityScores, AdjustDirection, Level};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("Select an ancestry before choosing a heritage")]
    AncestryRequired,
    #[error("Heritage '{heritage}' belongs to ancestry '{heritage_ancestry}', not '{ancestry}'")]
    HeritageMismatch {
        heritage: String,
        heritage_ancestry: String,
        ancestry: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Character {
    name: String,
    level: Level,
    ancestry: Option<Ancestry>,
    heritage: Option<Heritage>,
    background: Option<Background>,
    class: Option<CharacterClass>,
    abilities: AbilityScores,
    feats: Vec<Feat>,
    spells: Vec<Spell>,
    equipment: Vec<EquipmentItem>,
    #[serde(flatten)]
    derived: DerivedStats,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    pub fn new() -> Self {
        let level = Level::default();
        let abilities = AbilityScores::default();
        Self {
            name: String::new(),
            level,
            ancestry: None,
            heritage: None,
            background: None,
            class: None,
            abilities,
            feats: Vec::new(),
            spells: Vec::new(),
            equipment: Vec::new(),
            derived: DerivedStats::compute(None, None, &abilities, level),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn ancestry(&self) -> Option<&Ancestry> {
        self.ancestry.as_ref()
    }

    pub fn heritage(&self) -> Option<&Heritage> {
        self.heritage.as_ref()
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn class(&self) -> Option<&CharacterClass> {
        self.class.as_ref()
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn feats(&self) -> &[Feat] {
        &self.feats
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn equipment(&self) -> &[EquipmentItem] {
        &self.equipment
    }

    pub fn derived(&self) -> DerivedStats {
        self.derived
    }

    pub fn has_feat(&self, name: &str) -> bool {
        self.feats.iter().any(|f| f.name == name)
    }

    pub fn has_spell(&self, name: &str) -> bool {
        self.spells.iter().any(|s| s.name == name)
    }

    pub fn has_equipment(&self, name: &str) -> bool {
        self.equipment.iter().any(|e| e.name() == name)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.refresh();
    }

    /// Any integer is accepted and clamped into [1, 20]
    pub fn set_level(&mut self, level: i64) -> Level {
        self.level = Level::clamped(level);
        self.refresh();
        self.level
    }

    /// Replace the ancestry. An existing heritage is kept even if it belongs
    /// to the previous ancestry.
    pub fn select_ancestry(&mut self, ancestry: Ancestry) {
        self.ancestry = Some(ancestry);
        self.refresh();
    }

    pub fn select_heritage(&mut self, heritage: Heritage) -> Result<(), CharacterError> {
        let ancestry = self
            .ancestry
            .as_ref()
            .ok_or(CharacterError::AncestryRequired)?;
        if heritage.ancestry != ancestry.id {
            return Err(CharacterError::HeritageMismatch {
                heritage: heritage.id,
                heritage_ancestry: heritage.ancestry,
                ancestry: ancestry.id.clone(),
            });
        }
        self.heritage = Some(heritage);
        self.refresh();
        Ok(())
    }

    pub fn select_background(&mut self, background: Background) {
        self.background = Some(background);
        self.refresh();
    }

    pub fn select_class(&mut self, class: CharacterClass) {
        self.class = Some(class);
        self.refresh();
    }

    pub fn adjust_ability(&mut self, id: AbilityId, direction: AdjustDirection) -> i32 {
        let value = self.abilities.adjust(id, direction);
        self.refresh();
        value
    }

    /// Set a score directly; the wizard only moves scores in steps
    #[cfg(test)]
    pub fn set_ability(&mut self, id: AbilityId, score: i32) -> i32 {
        let value = self.abilities.set(id, score);
        self.refresh();
        value
    }

    /// Check or uncheck a feat. Returns true if the collection changed.
    pub fn set_feat(&mut self, feat: Feat, selected: bool) -> bool {
        let changed = toggle_by_name(&mut self.feats, feat, selected, |f| f.name.as_str());
        self.refresh();
        changed
    }

    pub fn set_spell(&mut self, spell: Spell, selected: bool) -> bool {
        let changed = toggle_by_name(&mut self.spells, spell, selected, |s| s.name.as_str());
        self.refresh();
        changed
    }

    pub fn set_equipment(&mut self, item: EquipmentItem, selected: bool) -> bool {
        let changed = toggle_by_name(&mut self.equipment, item, selected, EquipmentItem::name);
        self.refresh();
        changed
    }

    fn refresh(&mut self) {
        self.derived = DerivedStats::compute(
            self.ancestry.as_ref(),
            self.class.as_ref(),
            &self.abilities,
            self.level,
        );
    }
}

/// Add `item` if selected and absent, remove every entry with its name if
/// deselected. Keeps the collection free of duplicate names.
fn toggle_by_name<T>(items: &mut Vec<T>, item: T, selected: bool, name: fn(&T) -> &str) -> bool {
    let present = items.iter().any(|existing| name(existing) == name(&item));
    match (selected, present) {
        (true, false) => {
            items.push(item);
            true
        }
        (false, true) => {
            let target = name(&item).to_string();
            items.retain(|existing| name(existing) != target);
            true
        }
        _ => false,
    }
}
