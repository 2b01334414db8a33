//! HTTP REST API routes

mod chat_routes;
mod export_routes;
mod portrait_routes;
mod reference_routes;
mod settings_routes;
mod wizard_routes;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::application::services::WizardError;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Content routes
        .route("/api/content/stats", get(reference_routes::content_stats))
        .route("/api/gm/topics", get(reference_routes::list_gm_topics))
        .route("/api/reference", get(reference_routes::search_reference))
        // Wizard routes
        .route("/api/wizard", post(wizard_routes::create_session))
        .route(
            "/api/wizard/{id}",
            get(wizard_routes::get_session).delete(wizard_routes::delete_session),
        )
        .route("/api/wizard/{id}/advance", post(wizard_routes::advance))
        .route("/api/wizard/{id}/retreat", post(wizard_routes::retreat))
        .route(
            "/api/wizard/{id}/step/{index}",
            put(wizard_routes::jump_to_step),
        )
        .route("/api/wizard/{id}/updates", post(wizard_routes::apply_update))
        .route("/api/wizard/{id}/filters", put(wizard_routes::update_filters))
        .route("/api/wizard/{id}/sheet", get(wizard_routes::get_sheet))
        .route(
            "/api/wizard/{id}/export",
            get(export_routes::export_character),
        )
        // Portrait routes
        .route(
            "/api/wizard/{id}/portrait",
            get(portrait_routes::get_portrait).post(portrait_routes::generate_portrait),
        )
        // Assistant routes
        .route(
            "/api/wizard/{id}/chat",
            get(chat_routes::get_transcript).post(chat_routes::send_message),
        )
        .route(
            "/api/wizard/{id}/chat/topics/{topic_id}",
            post(chat_routes::post_topic),
        )
        // Settings routes
        .route(
            "/api/settings",
            get(settings_routes::get_settings).put(settings_routes::update_settings),
        )
}

pub(crate) fn parse_session_id(id: &str) -> Result<SessionId, (StatusCode, String)> {
    id.parse::<SessionId>()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))
}

pub(crate) fn session_not_found(id: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Session {} not found", id))
}

pub(crate) fn wizard_error(err: WizardError) -> (StatusCode, String) {
    let status = match &err {
        WizardError::UnknownRecord { .. } => StatusCode::NOT_FOUND,
        WizardError::InvalidStep(_) => StatusCode::BAD_REQUEST,
        WizardError::NotOffered { .. } | WizardError::Character(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    };
    (status, err.to_string())
}
