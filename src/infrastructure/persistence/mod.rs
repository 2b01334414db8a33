//! SQLite persistence adapters
//!
//! Only process-wide assistant settings are stored. Characters live in
//! memory for the lifetime of their session and leave only through export.

mod settings_repository;

pub use settings_repository::SqliteSettingsRepository;
