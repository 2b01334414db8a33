use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Process-wide string key/value store
#[async_trait]
pub trait SettingsRepositoryPort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}
