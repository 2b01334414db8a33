//! Wizard API routes

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{parse_session_id, session_not_found, wizard_error};
use crate::application::dto::{CharacterSheet, CharacterUpdate, FilterUpdate, WizardSnapshot};
use crate::infrastructure::state::AppState;

/// Start a new wizard session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<WizardSnapshot>), (StatusCode, String)> {
    let mut sessions = state.sessions.write().await;
    let session_id = sessions.create_session();
    let session = sessions.get_session(session_id).ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Session {} was not stored", session_id),
        )
    })?;
    Ok((StatusCode::CREATED, Json(state.wizard_service.snapshot(session))))
}

/// Get the current snapshot of a session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get_session(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    Ok(Json(state.wizard_service.snapshot(session)))
}

/// End a session and free its state
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    sessions
        .remove_session(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Go to the next step (no-op on the last step)
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    session.advance();
    Ok(Json(state.wizard_service.snapshot(session)))
}

/// Go to the previous step (no-op on the first step)
pub async fn retreat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WizardSnapshot>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    session.retreat();
    Ok(Json(state.wizard_service.snapshot(session)))
}

/// Jump to any step
pub async fn jump_to_step(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<WizardSnapshot>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    state
        .wizard_service
        .jump_to(session, index)
        .map_err(wizard_error)?;
    Ok(Json(state.wizard_service.snapshot(session)))
}

/// Apply one typed character update
pub async fn apply_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<CharacterUpdate>,
) -> Result<Json<WizardSnapshot>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    state
        .wizard_service
        .apply_update(session, update)
        .map_err(wizard_error)?;
    Ok(Json(state.wizard_service.snapshot(session)))
}

/// Replace a step's filter record
pub async fn update_filters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<FilterUpdate>,
) -> Result<Json<WizardSnapshot>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    state.wizard_service.apply_filter(session, update);
    Ok(Json(state.wizard_service.snapshot(session)))
}

#[derive(Debug, Deserialize)]
pub struct SheetQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// Character sheet as JSON, or plain text with `?format=text`
pub async fn get_sheet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<SheetQuery>,
) -> Result<Response, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get_session(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    let sheet = CharacterSheet::from_character(session.character());

    Ok(match query.format.as_deref() {
        Some("text") => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            sheet.render_text(),
        )
            .into_response(),
        _ => Json(sheet).into_response(),
    })
}
