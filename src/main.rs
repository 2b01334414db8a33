//! HeroBuilder Engine - Backend API for Pathfinder 2e character creation
//!
//! The Engine is the backend server that:
//! - Walks a character through the ten-step creation wizard
//! - Serves the rules reference and GM topics from the bundled catalog
//! - Answers rules questions through OpenAI, Anthropic or Gemini
//! - Generates character portraits through a text-to-image provider

mod application;
mod domain;
mod infrastructure;

#[cfg(test)]
mod test_fixtures;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use chrono::Utc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herobuilder_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HeroBuilder Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Content: {}", config.content_path);
    tracing::info!("  Settings DB: {}", config.settings_db_url);
    tracing::info!("  Image generation: {}", config.image_gen_base_url);
    tracing::info!(
        "  Sessions: max {}, idle timeout {} min",
        config.sessions.max_sessions,
        config.sessions.idle_timeout_minutes
    );

    // Initialize application state
    let state = AppState::new(&config).await?;
    let stats = state.content.stats();
    tracing::info!(entries = stats.total_entries, "Rules catalog loaded");
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    // Cleanup worker (removes idle wizard sessions)
    let cleanup_worker = {
        let state = state.clone();
        let interval = Duration::from_secs(config.sessions.cleanup_interval_secs.max(1));
        tokio::spawn(async move {
            tracing::info!("Starting session cleanup worker");
            loop {
                tokio::time::sleep(interval).await;

                let mut sessions = state.sessions.write().await;
                let removed = sessions.evict_idle(Utc::now());
                if removed > 0 {
                    tracing::info!(
                        removed,
                        remaining = sessions.session_count(),
                        "Evicted idle wizard sessions"
                    );
                }
            }
        })
    };

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        // Merge REST API routes
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    cleanup_worker.abort();

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
