use super::model::GenerationPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEvent {
    Submit,
    Resolve,
    Reject,
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: GenerationPhase,
    pub event: GenerationEvent,
    pub to: GenerationPhase,
}

impl StateTransition {
    pub const fn new(from: GenerationPhase, event: GenerationEvent, to: GenerationPhase) -> Self {
        Self { from, event, to }
    }
}
