//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{
    ContentRepositoryPort, ImageGenerationPort, SettingsRepositoryPort,
};
use crate::application::services::{
    ChatService, PortraitService, ReferenceSearchService, SettingsService, WizardService,
};
use crate::infrastructure::config::{AppConfig, SessionConfig};
use crate::infrastructure::content::ContentCatalog;
use crate::infrastructure::image_gen::ImageGenClient;
use crate::infrastructure::llm::{AnthropicClient, ChatProviderRouter, GeminiClient, OpenAiClient};
use crate::infrastructure::persistence::SqliteSettingsRepository;
use crate::infrastructure::session::SessionManager;

/// Shared application state
pub struct AppState {
    pub content: Arc<dyn ContentRepositoryPort>,
    /// Active wizard sessions
    pub sessions: RwLock<SessionManager>,
    // Application services
    pub wizard_service: WizardService,
    pub reference_service: ReferenceSearchService,
    pub chat_service: ChatService<ChatProviderRouter>,
    pub portrait_service: PortraitService,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        // Load the rules catalog
        let catalog = ContentCatalog::load(&config.content_path)
            .with_context(|| format!("Failed to load rules catalog {}", config.content_path))?;

        // Initialize the settings store
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.settings_db_url)
            .await
            .context("Failed to open settings database")?;
        let settings_repository = SqliteSettingsRepository::new(pool)
            .await
            .context("Failed to initialize settings table")?;

        // Initialize provider clients
        let llm = ChatProviderRouter::new(
            OpenAiClient::new(&config.openai_base_url),
            AnthropicClient::new(&config.anthropic_base_url),
            GeminiClient::new(&config.gemini_base_url),
        );
        let images = ImageGenClient::new(
            &config.image_gen_base_url,
            &config.image_gen_model,
            config.image_gen_api_key.clone(),
        );

        Ok(Self::from_parts(
            Arc::new(catalog),
            Arc::new(settings_repository),
            llm,
            Arc::new(images),
            config.sessions.clone(),
        ))
    }

    /// Wire services around already constructed adapters
    pub fn from_parts(
        content: Arc<dyn ContentRepositoryPort>,
        settings_repository: Arc<dyn SettingsRepositoryPort>,
        llm: ChatProviderRouter,
        images: Arc<dyn ImageGenerationPort>,
        sessions: SessionConfig,
    ) -> Self {
        Self {
            wizard_service: WizardService::new(content.clone()),
            reference_service: ReferenceSearchService::new(content.clone()),
            chat_service: ChatService::new(content.clone(), llm),
            portrait_service: PortraitService::new(images),
            settings_service: SettingsService::new(settings_repository),
            sessions: RwLock::new(SessionManager::new(sessions)),
            content,
        }
    }
}
