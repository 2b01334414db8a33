//! Domain layer - Core character-building logic with no I/O
//!
//! This layer contains:
//! - Entities: rules content records and the Character aggregate
//! - Value Objects: ability scores, levels, filters, wizard steps, settings
//! - Aggregates: the wizard session that owns one character
//! - Domain Services: derived stat computation

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
