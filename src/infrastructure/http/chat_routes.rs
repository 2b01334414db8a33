//! Rules assistant routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{parse_session_id, session_not_found};
use crate::application::services::{ChatError, ChatStart, PendingChat};
use crate::domain::value_objects::{AiSettings, ChatTranscript, SessionId};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
}

pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChatTranscript>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get_session(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    Ok(Json(session.transcript().clone()))
}

/// Ask the assistant. A remote answer is fetched in the background; the
/// response carries the transcript with its pending placeholder (202).
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ChatMessageRequest>,
) -> Result<(StatusCode, Json<ChatTranscript>), (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;

    // Read settings before taking the session lock
    let settings = match state.settings_service.get().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to read assistant settings, answering locally: {}", e);
            AiSettings::default()
        }
    };

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;

    let status = match state.chat_service.begin(session, &req.message, &settings) {
        ChatStart::Ignored | ChatStart::Answered => StatusCode::OK,
        ChatStart::Pending(pending) => {
            tokio::spawn(run_remote_chat(state.clone(), session_id, pending));
            StatusCode::ACCEPTED
        }
    };

    Ok((status, Json(session.transcript().clone())))
}

async fn run_remote_chat(state: Arc<AppState>, session_id: SessionId, pending: PendingChat) {
    let outcome = state.chat_service.complete(&pending).await;

    let mut sessions = state.sessions.write().await;
    match sessions.get_session_mut(session_id) {
        Some(session) => state.chat_service.finish(session, &pending, outcome),
        None => tracing::warn!(session_id = %session_id, "Session closed before chat reply"),
    }
}

/// Post a GM reference topic into the transcript
pub async fn post_topic(
    State(state): State<Arc<AppState>>,
    Path((id, topic_id)): Path<(String, String)>,
) -> Result<Json<ChatTranscript>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_session_mut(session_id)
        .ok_or_else(|| session_not_found(&id))?;

    state
        .chat_service
        .post_topic(session, &topic_id)
        .map_err(|e| match e {
            ChatError::UnknownTopic(_) => (StatusCode::NOT_FOUND, e.to_string()),
        })?;

    Ok(Json(session.transcript().clone()))
}
