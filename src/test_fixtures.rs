//! Shared fixtures for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::outbound::{SettingsError, SettingsRepositoryPort};
use crate::infrastructure::content::ContentCatalog;

/// The catalog shipped in `data/`
pub const SAMPLE_CATALOG_JSON: &str = include_str!("../data/catalog.json");

pub fn sample_catalog() -> ContentCatalog {
    ContentCatalog::from_json_str(SAMPLE_CATALOG_JSON).expect("bundled catalog is valid")
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SettingsRepositoryPort for InMemorySettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.lock().expect("lock").get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .lock()
            .expect("lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
