use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::outbound::{SettingsError, SettingsRepositoryPort};
use crate::domain::value_objects::{AiProvider, AiSettings, API_KEY_KEY, PROVIDER_KEY};

/// Assistant settings backed by the key/value store
///
/// There is no cache: every read goes to the store, so a save is visible to
/// the very next chat message.
pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryPort>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryPort>) -> Self {
        Self { repository }
    }

    /// Current settings. Missing keys fall back to defaults; an unreadable
    /// provider value falls back to the default provider.
    pub async fn get(&self) -> Result<AiSettings, SettingsError> {
        let provider = match self.repository.get(PROVIDER_KEY).await? {
            Some(raw) => raw.parse::<AiProvider>().unwrap_or_else(|e| {
                warn!("{}, using {}", e, AiProvider::default());
                AiProvider::default()
            }),
            None => AiProvider::default(),
        };
        let api_key = self.repository.get(API_KEY_KEY).await?.unwrap_or_default();
        Ok(AiSettings { provider, api_key })
    }

    /// Persist both keys
    pub async fn save(&self, settings: &AiSettings) -> Result<(), SettingsError> {
        self.repository
            .set(PROVIDER_KEY, settings.provider.as_str())
            .await?;
        self.repository
            .set(API_KEY_KEY, settings.api_key.trim())
            .await?;
        info!(
            provider = %settings.provider,
            has_key = settings.has_credential(),
            "Assistant settings saved"
        );
        Ok(())
    }
}
