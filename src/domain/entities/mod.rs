//! Domain entities - Rules content records and the character under construction

mod character;
mod content;

pub use character::{Character, CharacterError};
pub use content::{
    AbilityInfo, Action, Ancestry, Armor, Background, CharacterClass, Condition, ContentCategory,
    ContentRecord, EquipmentItem, Feat, Gear, GmTopic, Heritage, MagicItem, Skill, Spell, Weapon,
};
