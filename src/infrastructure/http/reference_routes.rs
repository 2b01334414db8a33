//! Reference search and content catalog routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::dto::ReferenceResults;
use crate::application::ports::outbound::ContentStats;
use crate::domain::entities::GmTopic;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReferenceQuery {
    #[serde(default)]
    pub q: String,
}

/// Substring search over the rules reference
pub async fn search_reference(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReferenceQuery>,
) -> Json<ReferenceResults> {
    Json(state.reference_service.search(&query.q))
}

pub async fn content_stats(State(state): State<Arc<AppState>>) -> Json<ContentStats> {
    Json(state.content.stats())
}

pub async fn list_gm_topics(State(state): State<Arc<AppState>>) -> Json<Vec<GmTopic>> {
    Json(state.content.gm_topics().to_vec())
}
