pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{GenerationEvent, StateTransition};
pub use machine::GenerationMachine;
pub use model::GenerationPhase;
