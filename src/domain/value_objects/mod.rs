//! Value objects - Immutable objects defined by their attributes

mod abilities;
mod categories;
mod chat;
mod filters;
mod ids;
mod lenient;
mod portrait;
mod settings;
mod wizard_step;

pub use abilities::{AbilityId, AbilityScores, AdjustDirection, Level, ABILITY_MAX, ABILITY_MIN};
pub use categories::{EquipmentCategory, FeatCategory, Tradition};
pub use chat::{ChatRole, ChatTranscript};
pub use filters::{max_spell_rank, EquipmentFilter, FeatFilter, SpellFilter, StepFilters};
pub use ids::SessionId;
pub use lenient::saturating_i64;
pub use portrait::{GeneratedImage, PortraitState};
pub use settings::{AiProvider, AiSettings, API_KEY_KEY, PROVIDER_KEY};
pub use wizard_step::{InvalidStepIndex, StepEngine, WizardStep};
