//! Character export route

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use super::{parse_session_id, session_not_found};
use crate::infrastructure::export::CharacterExporter;
use crate::infrastructure::state::AppState;

/// Download the character as a JSON file
pub async fn export_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions
        .get_session(session_id)
        .ok_or_else(|| session_not_found(&id))?;
    let character = session.character();

    let body = CharacterExporter::to_json(character).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize character: {}", e),
        )
    })?;
    let disposition = CharacterExporter::content_disposition(character);

    tracing::info!(session_id = %session_id, "Exported character");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
