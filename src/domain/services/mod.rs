//! Domain services - Pure business logic operations

mod derived_stats;

pub use derived_stats::{ability_modifier, format_modifier, DerivedStats};
