//! Content repository port - read-only access to the rules catalog

use serde::Serialize;

use crate::domain::entities::{
    AbilityInfo, Action, Ancestry, Armor, Background, CharacterClass, Condition, ContentRecord,
    EquipmentItem, Feat, Gear, GmTopic, Heritage, MagicItem, Skill, Spell, Weapon,
};
use crate::domain::value_objects::{AbilityId, EquipmentCategory};

/// Record counts per catalog category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub ancestries: usize,
    pub heritages: usize,
    pub backgrounds: usize,
    pub classes: usize,
    pub feats: usize,
    pub spells: usize,
    pub weapons: usize,
    pub armor: usize,
    pub gear: usize,
    pub magic_items: usize,
    pub conditions: usize,
    pub actions: usize,
    pub skills: usize,
    pub gm_topics: usize,
    pub total_entries: usize,
}

/// Immutable, pre-loaded rules catalog
///
/// Implementors only provide the category slices; lookups and the
/// flattened views are derived from them.
pub trait ContentRepositoryPort: Send + Sync {
    fn ancestries(&self) -> &[Ancestry];
    fn heritages(&self) -> &[Heritage];
    fn backgrounds(&self) -> &[Background];
    fn classes(&self) -> &[CharacterClass];
    fn abilities(&self) -> &[AbilityInfo];
    fn feats(&self) -> &[Feat];
    fn spells(&self) -> &[Spell];
    fn weapons(&self) -> &[Weapon];
    fn armor(&self) -> &[Armor];
    fn gear(&self) -> &[Gear];
    fn magic_items(&self) -> &[MagicItem];
    fn conditions(&self) -> &[Condition];
    fn actions(&self) -> &[Action];
    fn skills(&self) -> &[Skill];
    fn gm_topics(&self) -> &[GmTopic];

    fn find_ancestry(&self, id: &str) -> Option<&Ancestry> {
        self.ancestries().iter().find(|a| a.id == id)
    }

    fn find_heritage(&self, id: &str) -> Option<&Heritage> {
        self.heritages().iter().find(|h| h.id == id)
    }

    fn find_background(&self, id: &str) -> Option<&Background> {
        self.backgrounds().iter().find(|b| b.id == id)
    }

    fn find_class(&self, id: &str) -> Option<&CharacterClass> {
        self.classes().iter().find(|c| c.id == id)
    }

    fn find_gm_topic(&self, id: &str) -> Option<&GmTopic> {
        self.gm_topics().iter().find(|t| t.id == id)
    }

    fn ability_info(&self, id: AbilityId) -> Option<&AbilityInfo> {
        self.abilities().iter().find(|a| a.id == id)
    }

    /// Heritages whose parent ancestry is `ancestry_id`
    fn heritages_of(&self, ancestry_id: &str) -> Vec<&Heritage> {
        self.heritages()
            .iter()
            .filter(|h| h.ancestry == ancestry_id)
            .collect()
    }

    /// Items of one sub-catalog (or all four, in listing order), tagged with
    /// their source category
    fn equipment(&self, category: Option<EquipmentCategory>) -> Vec<EquipmentItem> {
        let wanted = |c: EquipmentCategory| category.map_or(true, |only| only == c);
        let mut items = Vec::new();
        for c in EquipmentCategory::ALL {
            if !wanted(c) {
                continue;
            }
            match c {
                EquipmentCategory::Weapon => items.extend(
                    self.weapons().iter().cloned().map(EquipmentItem::Weapon),
                ),
                EquipmentCategory::Armor => {
                    items.extend(self.armor().iter().cloned().map(EquipmentItem::Armor))
                }
                EquipmentCategory::Gear => {
                    items.extend(self.gear().iter().cloned().map(EquipmentItem::Gear))
                }
                EquipmentCategory::MagicItem => items.extend(
                    self.magic_items().iter().cloned().map(EquipmentItem::MagicItem),
                ),
            }
        }
        items
    }

    /// Every reference record, in fixed catalog concatenation order
    fn reference_records(&self) -> Vec<ContentRecord<'_>> {
        let mut records = Vec::new();
        records.extend(self.conditions().iter().map(ContentRecord::Condition));
        records.extend(self.actions().iter().map(ContentRecord::Action));
        records.extend(self.skills().iter().map(ContentRecord::Skill));
        records.extend(self.spells().iter().map(ContentRecord::Spell));
        records.extend(self.feats().iter().map(ContentRecord::Feat));
        records.extend(self.weapons().iter().map(ContentRecord::Weapon));
        records.extend(self.armor().iter().map(ContentRecord::Armor));
        records.extend(self.magic_items().iter().map(ContentRecord::MagicItem));
        records.extend(self.gear().iter().map(ContentRecord::Gear));
        records
    }

    fn stats(&self) -> ContentStats {
        let mut stats = ContentStats {
            ancestries: self.ancestries().len(),
            heritages: self.heritages().len(),
            backgrounds: self.backgrounds().len(),
            classes: self.classes().len(),
            feats: self.feats().len(),
            spells: self.spells().len(),
            weapons: self.weapons().len(),
            armor: self.armor().len(),
            gear: self.gear().len(),
            magic_items: self.magic_items().len(),
            conditions: self.conditions().len(),
            actions: self.actions().len(),
            skills: self.skills().len(),
            gm_topics: self.gm_topics().len(),
            total_entries: 0,
        };
        stats.total_entries = stats.ancestries
            + stats.heritages
            + stats.backgrounds
            + stats.classes
            + stats.feats
            + stats.spells
            + stats.weapons
            + stats.armor
            + stats.gear
            + stats.magic_items
            + stats.conditions
            + stats.actions
            + stats.skills
            + stats.gm_topics;
        stats
    }
}
