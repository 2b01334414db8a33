//! Wizard Session Aggregate - one character under construction
//!
//! A session owns exactly one Character together with the wizard position,
//! the per-step filters, the assistant transcript and the portrait state.
//! Every change goes through this aggregate and bumps `revision`, so clients
//! can tell whether the view they hold is current.

use chrono::{DateTime, Utc};

use crate::domain::entities::Character;
use crate::domain::value_objects::{
    ChatTranscript, EquipmentFilter, FeatFilter, InvalidStepIndex, PortraitState, SessionId,
    SpellFilter, StepEngine, StepFilters, WizardStep,
};

#[derive(Debug, Clone)]
pub struct WizardSession {
    id: SessionId,
    character: Character,
    engine: StepEngine,
    filters: StepFilters,
    transcript: ChatTranscript,
    portrait: PortraitState,
    revision: u64,
    /// Time of the last change, used for idle eviction
    last_active: DateTime<Utc>,
}

impl WizardSession {
    pub fn new(id: SessionId, max_chat_history: usize) -> Self {
        Self {
            id,
            character: Character::new(),
            engine: StepEngine::new(),
            filters: StepFilters::default(),
            transcript: ChatTranscript::new(max_chat_history),
            portrait: PortraitState::Idle,
            revision: 0,
            last_active: Utc::now(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn engine(&self) -> &StepEngine {
        &self.engine
    }

    pub fn current_step(&self) -> WizardStep {
        self.engine.current()
    }

    pub fn filters(&self) -> &StepFilters {
        &self.filters
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn portrait(&self) -> &PortraitState {
        &self.portrait
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn advance(&mut self) -> bool {
        let moved = self.engine.advance();
        if moved {
            self.touch();
        }
        moved
    }

    pub fn retreat(&mut self) -> bool {
        let moved = self.engine.retreat();
        if moved {
            self.touch();
        }
        moved
    }

    pub fn jump_to(&mut self, index: usize) -> Result<WizardStep, InvalidStepIndex> {
        let step = self.engine.jump_to(index)?;
        self.touch();
        Ok(step)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Run one character update. The character recomputes its derived
    /// stats inside every mutator, so the result is consistent on return.
    pub fn commit<T>(&mut self, update: impl FnOnce(&mut Character) -> T) -> T {
        let result = update(&mut self.character);
        self.touch();
        result
    }

    /// Like [`commit`](Self::commit) for fallible updates. The revision only
    /// moves when the update succeeds.
    pub fn try_commit<T, E>(
        &mut self,
        update: impl FnOnce(&mut Character) -> Result<T, E>,
    ) -> Result<T, E> {
        let result = update(&mut self.character)?;
        self.touch();
        Ok(result)
    }

    pub fn set_feat_filter(&mut self, filter: FeatFilter) {
        self.filters.feats = filter;
        self.touch();
    }

    pub fn set_spell_filter(&mut self, filter: SpellFilter) {
        self.filters.spells = filter;
        self.touch();
    }

    pub fn set_equipment_filter(&mut self, filter: EquipmentFilter) {
        self.filters.equipment = filter;
        self.touch();
    }

    pub fn transcript_mut(&mut self) -> &mut ChatTranscript {
        self.touch();
        &mut self.transcript
    }

    pub fn set_portrait(&mut self, portrait: PortraitState) {
        self.portrait = portrait;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.last_active = Utc::now();
    }
}
