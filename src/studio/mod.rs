//! Meme studio: template selection, text overlays, and the rendering
//! request/response cycle.

mod preview;

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Template;
use crate::render::{RenderBackend, RenderError, RenderKind, RenderRequest, RenderResult};
use crate::resource::{Blob, ObjectUrl, ObjectUrlRegistry};
use crate::state::{GenerationEvent, GenerationMachine, GenerationPhase, StateError};
use crate::storage::{DownloadStorage, StorageError};

pub use preview::PreviewComposition;

/// Input limit for each overlay text, in characters.
pub const TEXT_MAX_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no template selected")]
    Skipped,
    #[error("a generation request is already in flight")]
    Busy,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to save {filename}: {source}")]
    Save {
        filename: &'static str,
        #[source]
        source: StorageError,
    },
    #[error(transparent)]
    State(#[from] StateError),
}

impl GenerationError {
    /// Skips and busy rejections are never shown to the user.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Skipped | Self::Busy)
    }
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Flattened { url: String },
    StickerSaved { path: PathBuf },
}

/// Ticket for a request started with [`Studio::begin`].
#[derive(Debug)]
#[must_use = "a pending generation must be completed to return the studio to idle"]
pub struct PendingGeneration {
    kind: RenderKind,
    request: RenderRequest,
}

impl PendingGeneration {
    pub fn kind(&self) -> RenderKind {
        self.kind
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct Studio {
    templates: Vec<Template>,
    selected: Option<usize>,
    top_text: String,
    bottom_text: String,
    machine: GenerationMachine,
    in_flight: Option<RenderKind>,
    result: Option<ObjectUrl>,
    registry: ObjectUrlRegistry,
}

impl Studio {
    pub fn new(templates: Vec<Template>) -> Self {
        let selected = (!templates.is_empty()).then_some(0);
        Self {
            templates,
            selected,
            top_text: String::new(),
            bottom_text: String::new(),
            machine: GenerationMachine::new(),
            in_flight: None,
            result: None,
            registry: ObjectUrlRegistry::new(),
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn selected_template(&self) -> Option<&Template> {
        self.selected.and_then(|index| self.templates.get(index))
    }

    pub fn select_template(&mut self, url: &str) -> bool {
        match self.templates.iter().position(|template| template.url == url) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn select_template_by_name(&mut self, name: &str) -> bool {
        match self
            .templates
            .iter()
            .position(|template| template.name.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    pub fn set_top_text(&mut self, text: &str) {
        self.top_text = clamp_text(text);
    }

    pub fn set_bottom_text(&mut self, text: &str) {
        self.bottom_text = clamp_text(text);
    }

    pub fn phase(&self) -> GenerationPhase {
        self.machine.phase()
    }

    pub fn last_settled(&self) -> Option<GenerationPhase> {
        self.machine.last_settled()
    }

    pub fn in_flight(&self) -> Option<RenderKind> {
        self.in_flight
    }

    /// Trigger controls are enabled only while this holds.
    pub fn accepts_triggers(&self) -> bool {
        self.in_flight.is_none() && self.phase().accepts_triggers()
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result.as_ref().map(ObjectUrl::as_str)
    }

    pub fn result_blob(&self) -> Option<&Blob> {
        self.result
            .as_ref()
            .and_then(|handle| self.registry.resolve(handle))
    }

    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.registry
    }

    pub fn preview(&self) -> PreviewComposition<'_> {
        PreviewComposition::compose(
            self.result_url(),
            self.selected_template(),
            &self.top_text,
            &self.bottom_text,
        )
    }

    /// Moves to `Requesting` and builds the request body.
    pub fn begin(&mut self, kind: RenderKind) -> GenerationResult<PendingGeneration> {
        let Some(template) = self.selected_template() else {
            tracing::debug!(?kind, "generation skipped: no template selected");
            return Err(GenerationError::Skipped);
        };
        let template_name = template.name.clone();
        let request = RenderRequest {
            image_url: template.url.clone(),
            top_text: self.top_text.clone(),
            bottom_text: self.bottom_text.clone(),
        };
        if let Some(active) = self.in_flight {
            tracing::debug!(?kind, ?active, "generation rejected: request in flight");
            return Err(GenerationError::Busy);
        }

        self.machine.transition(GenerationEvent::Submit)?;
        self.in_flight = Some(kind);
        tracing::info!(?kind, template = %template_name, "generation requested");

        Ok(PendingGeneration { kind, request })
    }

    /// Applies the service outcome, then always settles back to `Idle`.
    pub fn complete(
        &mut self,
        pending: PendingGeneration,
        outcome: RenderResult<Vec<u8>>,
        storage: &dyn DownloadStorage,
    ) -> GenerationResult<GenerationOutcome> {
        let kind = pending.kind;
        let result = match outcome {
            Ok(payload) => self.apply_payload(kind, payload, storage),
            Err(err) => Err(GenerationError::Render(err)),
        };

        let event = if result.is_ok() {
            GenerationEvent::Resolve
        } else {
            GenerationEvent::Reject
        };
        let settled = self
            .machine
            .transition(event)
            .and_then(|_| self.machine.transition(GenerationEvent::Settle));
        self.in_flight = None;

        match &result {
            Ok(outcome) => tracing::info!(?kind, ?outcome, "generation succeeded"),
            Err(err) => tracing::warn!(?kind, %err, "generation failed"),
        }
        settled?;
        result
    }

    pub async fn generate<B: RenderBackend>(
        &mut self,
        backend: &B,
        storage: &dyn DownloadStorage,
    ) -> GenerationResult<GenerationOutcome> {
        self.run(RenderKind::Flatten, backend, storage).await
    }

    pub async fn generate_sticker<B: RenderBackend>(
        &mut self,
        backend: &B,
        storage: &dyn DownloadStorage,
    ) -> GenerationResult<GenerationOutcome> {
        self.run(RenderKind::Sticker, backend, storage).await
    }

    /// Saves the held flatten result; `None` when nothing has been generated yet.
    pub fn download(&self, storage: &dyn DownloadStorage) -> Result<Option<PathBuf>, StorageError> {
        let Some(blob) = self.result_blob() else {
            return Ok(None);
        };
        storage
            .save_download(&blob.payload, RenderKind::Flatten.download_filename())
            .map(Some)
    }

    async fn run<B: RenderBackend>(
        &mut self,
        kind: RenderKind,
        backend: &B,
        storage: &dyn DownloadStorage,
    ) -> GenerationResult<GenerationOutcome> {
        let pending = self.begin(kind)?;
        let outcome = backend.render(kind, pending.request()).await;
        self.complete(pending, outcome, storage)
    }

    fn apply_payload(
        &mut self,
        kind: RenderKind,
        payload: Vec<u8>,
        storage: &dyn DownloadStorage,
    ) -> GenerationResult<GenerationOutcome> {
        match kind {
            RenderKind::Flatten => {
                if let Some(previous) = self.result.take() {
                    self.registry.revoke(previous);
                }
                let handle = self.registry.create(payload);
                let url = handle.as_str().to_string();
                self.result = Some(handle);
                Ok(GenerationOutcome::Flattened { url })
            }
            RenderKind::Sticker => {
                let filename = kind.download_filename();
                let handle = self.registry.create(payload);
                let saved = match self.registry.resolve(&handle) {
                    Some(blob) => storage.save_download(&blob.payload, filename),
                    None => Err(StorageError::Io(std::io::ErrorKind::NotFound.into())),
                };
                self.registry.revoke(handle);
                saved
                    .map(|path| GenerationOutcome::StickerSaved { path })
                    .map_err(|source| GenerationError::Save { filename, source })
            }
        }
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(crate::catalog::default_templates())
    }
}

fn clamp_text(text: &str) -> String {
    text.chars().take(TEXT_MAX_CHARS).collect()
}
