use crate::catalog::CatalogError;
use crate::clipboard::ClipboardError;
use crate::storage::StorageError;
use crate::studio::GenerationError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("no catalog item titled {title:?}")]
    UnknownItem { title: String },
    #[error("no template named {name:?}")]
    UnknownTemplate { name: String },
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GenerationEvent, GenerationPhase, StateError};

    #[test]
    fn state_errors_surface_through_generation() {
        let err: AppError = GenerationError::from(StateError::InvalidStateTransition {
            from: GenerationPhase::Idle,
            event: GenerationEvent::Settle,
        })
        .into();

        assert!(matches!(err, AppError::Generation(GenerationError::State(_))));
    }

    #[test]
    fn unknown_item_names_the_title() {
        let err = AppError::UnknownItem {
            title: "Grumpy Cat".to_string(),
        };
        assert_eq!(err.to_string(), "no catalog item titled \"Grumpy Cat\"");
    }
}
