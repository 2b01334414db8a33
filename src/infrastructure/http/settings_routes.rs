//! Assistant settings routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::value_objects::{AiProvider, AiSettings};
use crate::infrastructure::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    #[serde(default)]
    pub reveal: bool,
}

/// Settings as returned to clients. The key is masked unless revealed.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub provider: AiProvider,
    pub api_key: String,
    pub has_key: bool,
}

impl SettingsView {
    fn new(settings: &AiSettings, reveal: bool) -> Self {
        Self {
            provider: settings.provider,
            api_key: if reveal {
                settings.api_key.clone()
            } else {
                settings.masked_key()
            },
            has_key: settings.has_credential(),
        }
    }
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SettingsQuery>,
) -> Result<Json<SettingsView>, (StatusCode, String)> {
    let settings = state
        .settings_service
        .get()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(SettingsView::new(&settings, query.reveal)))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<AiSettings>,
) -> Result<Json<SettingsView>, (StatusCode, String)> {
    state
        .settings_service
        .save(&settings)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let saved = state
        .settings_service
        .get()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(SettingsView::new(&saved, false)))
}
