//! JSON-backed rules catalog
//!
//! The whole catalog is read once at startup and never changes afterwards,
//! so it is shared as a plain `Arc` without locking.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{
    AbilityInfo, Action, Ancestry, Armor, Background, CharacterClass, Condition, Feat, Gear,
    GmTopic, Heritage, MagicItem, Skill, Spell, Weapon,
};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Heritage '{heritage}' refers to unknown ancestry '{ancestry}'")]
    DanglingHeritage { heritage: String, ancestry: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentCatalog {
    pub ancestries: Vec<Ancestry>,
    pub heritages: Vec<Heritage>,
    pub backgrounds: Vec<Background>,
    pub classes: Vec<CharacterClass>,
    pub abilities: Vec<AbilityInfo>,
    pub feats: Vec<Feat>,
    pub spells: Vec<Spell>,
    pub weapons: Vec<Weapon>,
    pub armor: Vec<Armor>,
    pub gear: Vec<Gear>,
    pub magic_items: Vec<MagicItem>,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    pub skills: Vec<Skill>,
    pub gm_topics: Vec<GmTopic>,
}

impl ContentCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            entries = catalog.stats().total_entries,
            "Rules catalog loaded"
        );
        Ok(catalog)
    }

    /// Every heritage must point at an ancestry that exists
    fn validate(&self) -> Result<(), ContentError> {
        for heritage in &self.heritages {
            if self.find_ancestry(&heritage.ancestry).is_none() {
                return Err(ContentError::DanglingHeritage {
                    heritage: heritage.id.clone(),
                    ancestry: heritage.ancestry.clone(),
                });
            }
        }
        Ok(())
    }
}

impl ContentRepositoryPort for ContentCatalog {
    fn ancestries(&self) -> &[Ancestry] {
        &self.ancestries
    }

    fn heritages(&self) -> &[Heritage] {
        &self.heritages
    }

    fn backgrounds(&self) -> &[Background] {
        &self.backgrounds
    }

    fn classes(&self) -> &[CharacterClass] {
        &self.classes
    }

    fn abilities(&self) -> &[AbilityInfo] {
        &self.abilities
    }

    fn feats(&self) -> &[Feat] {
        &self.feats
    }

    fn spells(&self) -> &[Spell] {
        &self.spells
    }

    fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    fn armor(&self) -> &[Armor] {
        &self.armor
    }

    fn gear(&self) -> &[Gear] {
        &self.gear
    }

    fn magic_items(&self) -> &[MagicItem] {
        &self.magic_items
    }

    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }

    fn skills(&self) -> &[Skill] {
        &self.skills
    }

    fn gm_topics(&self) -> &[GmTopic] {
        &self.gm_topics
    }
}
