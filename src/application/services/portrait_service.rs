//! Portrait Service - text-to-image portrait of the character

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::ports::outbound::{ImageGenerationError, ImageGenerationPort};
use crate::domain::aggregates::WizardSession;
use crate::domain::entities::Character;
use crate::domain::value_objects::{GeneratedImage, PortraitState};

/// Build the image prompt from the current selections
pub fn portrait_prompt(character: &Character) -> String {
    let ancestry = character
        .ancestry()
        .map(|a| a.alt_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Human");
    let class = character
        .class()
        .map(|c| c.alt_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Adventurer");
    let heritage = character.heritage().map(|h| h.name.as_str()).unwrap_or("");

    format!(
        "Fantasy character portrait: {} {}, {}, heroic pose, detailed armor and weapons, \
         Pathfinder RPG style, digital art, dramatic lighting",
        ancestry, class, heritage
    )
}

pub struct PortraitService {
    generator: Arc<dyn ImageGenerationPort>,
}

impl PortraitService {
    pub fn new(generator: Arc<dyn ImageGenerationPort>) -> Self {
        Self { generator }
    }

    /// Move the session into the generating state. Returns the prompt to send,
    /// or `None` if a portrait is already being generated.
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    pub fn begin(&self, session: &mut WizardSession) -> Option<String> {
        if session.portrait().is_generating() {
            return None;
        }
        let prompt = portrait_prompt(session.character());
        session.set_portrait(PortraitState::Generating {
            prompt: prompt.clone(),
        });
        Some(prompt)
    }

    /// Call the image provider. Must not be called while holding the
    /// session lock.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageGenerationError> {
        info!("Requesting character portrait");
        self.generator.generate(prompt).await
    }

    pub fn finish(
        &self,
        session: &mut WizardSession,
        prompt: String,
        outcome: Result<GeneratedImage, ImageGenerationError>,
    ) {
        let state = match outcome {
            Ok(image) => PortraitState::Ready { prompt, image },
            Err(err) => {
                warn!(session_id = %session.id(), error = %err, "Portrait generation failed");
                PortraitState::Failed {
                    prompt,
                    message: err.to_string(),
                }
            }
        };
        session.set_portrait(state);
    }
}
