//! Wizard steps and the step engine that moves between them

use serde::{Deserialize, Serialize};

/// The fixed, ordered wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    NameAndLevel,
    Ancestry,
    Heritage,
    Background,
    Class,
    Abilities,
    Feats,
    Spells,
    Equipment,
    Complete,
}

impl WizardStep {
    pub const ALL: [WizardStep; 10] = [
        Self::NameAndLevel,
        Self::Ancestry,
        Self::Heritage,
        Self::Background,
        Self::Class,
        Self::Abilities,
        Self::Feats,
        Self::Spells,
        Self::Equipment,
        Self::Complete,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(&self) -> usize {
        // ALL is declared in variant order
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::NameAndLevel => "1. Name & Level",
            Self::Ancestry => "2. Ancestry",
            Self::Heritage => "3. Heritage",
            Self::Background => "4. Background",
            Self::Class => "5. Class",
            Self::Abilities => "6. Ability Scores",
            Self::Feats => "7. Feats",
            Self::Spells => "8. Spells",
            Self::Equipment => "9. Equipment",
            Self::Complete => "10. Complete!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Step index {0} is out of range (0..{max})", max = WizardStep::COUNT)]
pub struct InvalidStepIndex(pub usize);

/// Tracks the current step. Navigation is never gated on completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEngine {
    current: usize,
}

impl StepEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        // current is only ever set to a valid index
        WizardStep::ALL[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn can_advance(&self) -> bool {
        self.current + 1 < WizardStep::COUNT
    }

    pub fn can_retreat(&self) -> bool {
        self.current > 0
    }

    /// Move forward one step. Returns false (and does nothing) on the last step.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one step. Returns false (and does nothing) on the first step.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn jump_to(&mut self, index: usize) -> Result<WizardStep, InvalidStepIndex> {
        let step = WizardStep::from_index(index).ok_or(InvalidStepIndex(index))?;
        self.current = index;
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_matches_index() {
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(WizardStep::from_index(i), Some(*step));
        }
        assert_eq!(WizardStep::COUNT, 10);
        assert_eq!(WizardStep::from_index(10), None);
    }

    #[test]
    fn test_engine_starts_at_first_step() {
        let engine = StepEngine::new();
        assert_eq!(engine.current(), WizardStep::NameAndLevel);
        assert!(!engine.can_retreat());
        assert!(engine.can_advance());
    }

    #[test]
    fn test_retreat_from_first_step_is_noop() {
        let mut engine = StepEngine::new();
        assert!(!engine.retreat());
        assert_eq!(engine.index(), 0);
    }

    #[test]
    fn test_advance_from_last_step_is_noop() {
        let mut engine = StepEngine::new();
        for _ in 0..WizardStep::COUNT - 1 {
            assert!(engine.advance());
        }
        assert_eq!(engine.current(), WizardStep::Complete);
        assert!(!engine.advance());
        assert_eq!(engine.current(), WizardStep::Complete);
    }

    #[test]
    fn test_jump_to_any_valid_index() {
        let mut engine = StepEngine::new();
        assert_eq!(engine.jump_to(8), Ok(WizardStep::Equipment));
        assert_eq!(engine.jump_to(2), Ok(WizardStep::Heritage));
        assert_eq!(engine.jump_to(10), Err(InvalidStepIndex(10)));
        assert_eq!(engine.current(), WizardStep::Heritage);
    }
}
