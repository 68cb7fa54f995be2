use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::{event::StateTransition, GenerationEvent, GenerationPhase};

const HISTORY_LIMIT: usize = 32;

#[derive(Debug)]
pub struct GenerationMachine {
    phase: GenerationPhase,
    last_settled: Option<GenerationPhase>,
    transition_history: VecDeque<StateTransition>,
}

impl GenerationMachine {
    pub fn new() -> Self {
        Self {
            phase: GenerationPhase::default(),
            last_settled: None,
            transition_history: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Outcome of the most recent request, kept after returning to `Idle`.
    pub fn last_settled(&self) -> Option<GenerationPhase> {
        self.last_settled
    }

    pub fn can_transition(&self, event: GenerationEvent) -> bool {
        self.next_phase(event).is_some()
    }

    pub fn next_phase(&self, event: GenerationEvent) -> Option<GenerationPhase> {
        use GenerationEvent::*;
        match (self.phase, event) {
            (GenerationPhase::Idle, Submit) => Some(GenerationPhase::Requesting),
            (GenerationPhase::Requesting, Resolve) => Some(GenerationPhase::Succeeded),
            (GenerationPhase::Requesting, Reject) => Some(GenerationPhase::Failed),
            (GenerationPhase::Succeeded | GenerationPhase::Failed, Settle) => {
                Some(GenerationPhase::Idle)
            }
            _ => None,
        }
    }

    pub fn transition(&mut self, event: GenerationEvent) -> StateResult<GenerationPhase> {
        tracing::debug!(from = ?self.phase, event = ?event, "request generation transition");
        let next = self.next_phase(event).ok_or_else(|| {
            let from = self.phase;
            tracing::warn!(from = ?from, event = ?event, "invalid generation transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        if next.is_settled() {
            self.last_settled = Some(next);
        }
        if self.transition_history.len() == HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history
            .push_back(StateTransition::new(self.phase, event, next));
        self.phase = next;

        Ok(self.phase)
    }
}

#[cfg(test)]
impl GenerationMachine {
    fn history(&self) -> Vec<StateTransition> {
        self.transition_history.iter().copied().collect()
    }
}

impl Default for GenerationMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GenerationMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GenerationPhase::{:?}", self.phase)
    }
}
