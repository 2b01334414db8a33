//! Character export functionality
//!
//! Serializes the character under construction into a versioned JSON
//! document for download.

mod character_export;

pub use character_export::CharacterExporter;
