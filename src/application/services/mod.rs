//! Application services - Use case implementations
//!
//! Services take their collaborators as outbound ports and return DTOs, so
//! the HTTP layer never touches the domain model directly.

pub mod chat_service;
pub mod portrait_service;
pub mod reference_search_service;
pub mod settings_service;
pub mod wizard;

pub use chat_service::{ChatError, ChatService, ChatStart, PendingChat};
pub use portrait_service::PortraitService;
pub use reference_search_service::ReferenceSearchService;
pub use settings_service::SettingsService;
pub use wizard::{WizardError, WizardService};
