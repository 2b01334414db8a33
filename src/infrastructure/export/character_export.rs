//! Character export document
//!
//! The export is the only way a character leaves the process. The document
//! declares its schema so later versions can migrate older files.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Character;

pub const EXPORT_SCHEMA: &str = "herobuilder.character";
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Serialized character with schema metadata
#[derive(Debug, Clone, Serialize)]
pub struct CharacterExport<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub character: &'a Character,
}

pub struct CharacterExporter;

impl CharacterExporter {
    pub fn export(character: &Character) -> CharacterExport<'_> {
        CharacterExport {
            schema: EXPORT_SCHEMA,
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            character,
        }
    }

    /// Pretty-printed JSON, as offered for download
    pub fn to_json(character: &Character) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::export(character))
    }

    /// Character name (or "character") plus `.json`
    pub fn file_name(character: &Character) -> String {
        let name = character.name().trim();
        if name.is_empty() {
            "character.json".to_string()
        } else {
            format!("{}.json", name)
        }
    }

    /// `Content-Disposition` value with an ASCII fallback and the exact
    /// UTF-8 name
    pub fn content_disposition(character: &Character) -> String {
        let file_name = Self::file_name(character);
        let fallback: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(&file_name)
        )
    }
}
