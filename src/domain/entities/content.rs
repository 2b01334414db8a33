//! Rules content records
//!
//! Every record carries a native `name`, an optional alternate (usually
//! English) `alt_name` and a `description`. Wizard selections store copies of
//! these records, so they are `Clone` and serialize into exports as-is.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AbilityId, EquipmentCategory, FeatCategory, Tradition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ancestry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    pub hp: i32,
    pub speed: i32,
    #[serde(default)]
    pub boosts: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heritage {
    pub id: String,
    /// Id of the ancestry this heritage belongs to
    pub ancestry: String,
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub boosts: Vec<String>,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    pub hp: i32,
    #[serde(default)]
    pub key_ability: String,
    #[serde(default)]
    pub spellcasting: bool,
    #[serde(default)]
    pub description: String,
}

/// Display metadata for one of the six abilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityInfo {
    pub id: AbilityId,
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feat {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    pub level: u8,
    pub category: FeatCategory,
    /// Class id this feat is restricted to; `None` means any class
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Feat {
    pub fn available_to(&self, class_id: Option<&str>) -> bool {
        match &self.class {
            None => true,
            Some(required) => class_id == Some(required.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    /// 0 is a cantrip
    pub rank: u8,
    #[serde(default)]
    pub traditions: Vec<Tradition>,
    #[serde(default)]
    pub description: String,
}

impl Spell {
    pub fn tradition_labels(&self) -> String {
        self.traditions
            .iter()
            .map(Tradition::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub damage: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    pub ac: i32,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicItem {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    /// Action cost as printed, e.g. "1", "2" or "reaction"
    #[serde(default)]
    pub actions: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub alt_name: String,
    #[serde(default)]
    pub ability: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmTopic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An equipment selection, tagged with the sub-catalog it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum EquipmentItem {
    Weapon(Weapon),
    Armor(Armor),
    Gear(Gear),
    MagicItem(MagicItem),
}

impl EquipmentItem {
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon(w) => &w.name,
            Self::Armor(a) => &a.name,
            Self::Gear(g) => &g.name,
            Self::MagicItem(m) => &m.name,
        }
    }

    pub fn alt_name(&self) -> &str {
        match self {
            Self::Weapon(w) => &w.alt_name,
            Self::Armor(a) => &a.alt_name,
            Self::Gear(g) => &g.alt_name,
            Self::MagicItem(m) => &m.alt_name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Weapon(w) => &w.description,
            Self::Armor(a) => &a.description,
            Self::Gear(g) => &g.description,
            Self::MagicItem(m) => &m.description,
        }
    }

    pub fn category(&self) -> EquipmentCategory {
        match self {
            Self::Weapon(_) => EquipmentCategory::Weapon,
            Self::Armor(_) => EquipmentCategory::Armor,
            Self::Gear(_) => EquipmentCategory::Gear,
            Self::MagicItem(_) => EquipmentCategory::MagicItem,
        }
    }

    pub fn price(&self) -> Option<&str> {
        let price = match self {
            Self::Weapon(w) => Some(w.price.as_str()),
            Self::Armor(a) => Some(a.price.as_str()),
            Self::Gear(g) => Some(g.price.as_str()),
            Self::MagicItem(m) => m.price.as_deref(),
        };
        price.filter(|p| !p.is_empty())
    }

    pub fn level(&self) -> Option<u8> {
        match self {
            Self::MagicItem(m) => m.level,
            _ => None,
        }
    }

    pub fn damage(&self) -> Option<&str> {
        match self {
            Self::Weapon(w) if !w.damage.is_empty() => Some(w.damage.as_str()),
            _ => None,
        }
    }
}

/// Categories covered by the rules reference, in listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Condition,
    Action,
    Skill,
    Spell,
    Feat,
    Weapon,
    Armor,
    MagicItem,
    Gear,
}

impl ContentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Condition => "Condition",
            Self::Action => "Action",
            Self::Skill => "Skill",
            Self::Spell => "Spell",
            Self::Feat => "Feat",
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::MagicItem => "Magic Item",
            Self::Gear => "Adventuring Gear",
        }
    }
}

/// A borrowed view over any reference record
#[derive(Debug, Clone, Copy)]
pub enum ContentRecord<'a> {
    Condition(&'a Condition),
    Action(&'a Action),
    Skill(&'a Skill),
    Spell(&'a Spell),
    Feat(&'a Feat),
    Weapon(&'a Weapon),
    Armor(&'a Armor),
    MagicItem(&'a MagicItem),
    Gear(&'a Gear),
}

impl<'a> ContentRecord<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Condition(r) => &r.name,
            Self::Action(r) => &r.name,
            Self::Skill(r) => &r.name,
            Self::Spell(r) => &r.name,
            Self::Feat(r) => &r.name,
            Self::Weapon(r) => &r.name,
            Self::Armor(r) => &r.name,
            Self::MagicItem(r) => &r.name,
            Self::Gear(r) => &r.name,
        }
    }

    pub fn description(&self) -> &'a str {
        match *self {
            Self::Condition(r) => &r.description,
            Self::Action(r) => &r.description,
            Self::Skill(r) => &r.description,
            Self::Spell(r) => &r.description,
            Self::Feat(r) => &r.description,
            Self::Weapon(r) => &r.description,
            Self::Armor(r) => &r.description,
            Self::MagicItem(r) => &r.description,
            Self::Gear(r) => &r.description,
        }
    }

    pub fn category(&self) -> ContentCategory {
        match self {
            Self::Condition(_) => ContentCategory::Condition,
            Self::Action(_) => ContentCategory::Action,
            Self::Skill(_) => ContentCategory::Skill,
            Self::Spell(_) => ContentCategory::Spell,
            Self::Feat(_) => ContentCategory::Feat,
            Self::Weapon(_) => ContentCategory::Weapon,
            Self::Armor(_) => ContentCategory::Armor,
            Self::MagicItem(_) => ContentCategory::MagicItem,
            Self::Gear(_) => ContentCategory::Gear,
        }
    }

    /// One-line summary prefixed with the category label
    pub fn summary(&self) -> String {
        let label = self.category().label();
        let line = match self {
            Self::Condition(c) => format!("{}: {}", label, c.alt_name),
            Self::Action(a) => format!("{}: {} [{} actions]", label, a.alt_name, a.actions),
            Self::Skill(s) => format!("{}: {} ({})", label, s.alt_name, s.ability),
            Self::Spell(s) => format!(
                "{}: {} R{} [{}]",
                label,
                s.alt_name,
                s.rank,
                s.tradition_labels()
            ),
            Self::Feat(f) => format!(
                "{}: {} Lv{} {} {}",
                label,
                f.alt_name,
                f.level,
                f.category.label(),
                f.class.as_deref().unwrap_or_default()
            ),
            Self::Weapon(w) => format!("{}: {} {} {}", label, w.alt_name, w.damage, w.price),
            Self::Armor(a) => format!("{}: {} AC+{} {}", label, a.alt_name, a.ac, a.price),
            Self::MagicItem(m) => format!(
                "{}: {} Lv{} {}",
                label,
                m.alt_name,
                m.level.map_or_else(|| "?".to_string(), |l| l.to_string()),
                m.price.as_deref().unwrap_or_default()
            ),
            Self::Gear(g) => format!("{}: {} {}", label, g.alt_name, g.price),
        };
        line.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feat(class: Option<&str>) -> Feat {
        Feat {
            name: "Power Attack".to_string(),
            alt_name: "Power Attack".to_string(),
            level: 1,
            category: FeatCategory::Class,
            class: class.map(str::to_string),
            description: String::new(),
        }
    }

    #[test]
    fn test_feat_class_restriction() {
        assert!(feat(None).available_to(None));
        assert!(feat(None).available_to(Some("wizard")));
        assert!(feat(Some("fighter")).available_to(Some("fighter")));
        assert!(!feat(Some("fighter")).available_to(Some("wizard")));
        assert!(!feat(Some("fighter")).available_to(None));
    }

    #[test]
    fn test_summary_is_category_annotated() {
        let spell = Spell {
            name: "Fireball".to_string(),
            alt_name: "Fireball".to_string(),
            rank: 3,
            traditions: vec![Tradition::Arcane, Tradition::Primal],
            description: String::new(),
        };
        assert_eq!(
            ContentRecord::Spell(&spell).summary(),
            "Spell: Fireball R3 [Arcane/Primal]"
        );

        let item = MagicItem {
            name: "Bag of Holding".to_string(),
            alt_name: "Bag of Holding".to_string(),
            level: None,
            price: None,
            description: String::new(),
        };
        assert_eq!(
            ContentRecord::MagicItem(&item).summary(),
            "Magic Item: Bag of Holding Lv?"
        );
    }

    #[test]
    fn test_equipment_item_serializes_with_category_tag() {
        let item = EquipmentItem::Armor(Armor {
            name: "Leather Armor".to_string(),
            alt_name: String::new(),
            ac: 1,
            price: "2 gp".to_string(),
            description: String::new(),
        });
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["category"], "armor");
        assert_eq!(json["name"], "Leather Armor");
        assert_eq!(item.price(), Some("2 gp"));
        assert_eq!(item.category(), EquipmentCategory::Armor);
    }
}
