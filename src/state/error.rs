use super::event::GenerationEvent;
use super::model::GenerationPhase;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid generation transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: GenerationPhase,
        event: GenerationEvent,
    },
}
