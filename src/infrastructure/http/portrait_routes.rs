//! Character portrait routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{parse_session_id, session_not_found};
use crate::domain::value_objects::{PortraitState, SessionId};
use crate::infrastructure::state::AppState;

pub async fn get_portrait(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PortraitState>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get_session(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    Ok(Json(session.portrait().clone()))
}

/// Start generating a portrait (202), or 409 while one is in flight
pub async fn generate_portrait(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<PortraitState>), (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;

    let prompt = state.portrait_service.begin(session).ok_or_else(|| {
        (
            StatusCode::CONFLICT,
            "A portrait is already being generated".to_string(),
        )
    })?;

    tokio::spawn(run_generation(state.clone(), session_id, prompt));

    Ok((StatusCode::ACCEPTED, Json(session.portrait().clone())))
}

async fn run_generation(state: Arc<AppState>, session_id: SessionId, prompt: String) {
    let outcome = state.portrait_service.generate(&prompt).await;

    let mut sessions = state.sessions.write().await;
    match sessions.get_session_mut(session_id) {
        Some(session) => state.portrait_service.finish(session, prompt, outcome),
        None => tracing::warn!(session_id = %session_id, "Session closed before portrait finished"),
    }
}
