//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Content: JSON rules catalog loaded at startup
//! - Persistence: SQLite key/value store for assistant settings
//! - HTTP: REST API routes
//! - LLM: OpenAI, Anthropic and Gemini chat clients
//! - Image generation: text-to-image portrait client
//! - Export: character download document
//! - Config, State, Session: wiring and per-session wizard state

pub mod config;
pub mod content;
pub mod export;
pub mod http;
pub mod image_gen;
pub mod llm;
pub mod persistence;
pub mod session;
pub mod state;
