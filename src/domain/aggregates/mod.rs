//! Aggregates - Cluster of domain objects treated as a single unit

pub mod wizard_session;

pub use wizard_session::WizardSession;
