//! One browsing + studio session. Maps every outcome to a toast.

use std::path::PathBuf;

use crate::browse::{
    self, aggregate_stats, compute_visible, BrowseState, CatalogStats, RandomSource, ThreadRandom,
    VibeFilter, VisibleList, SURPRISE_TOAST_MS,
};
use crate::catalog::{Catalog, CatalogItem};
use crate::clipboard::{ClipboardBackend, ClipboardResult};
use crate::notification::{ToastRuntime, CLIPBOARD_TOAST_MS, STUDIO_TOAST_MS};
use crate::render::{RenderBackend, RenderKind, RenderResult};
use crate::storage::{DownloadStorage, StorageResult};
use crate::studio::{
    GenerationError, GenerationOutcome, GenerationResult, PendingGeneration, Studio,
};

pub const COPY_SUCCESS_MESSAGE: &str = "Copied! Drop it in your chat.";
pub const COPY_BLOCKED_MESSAGE: &str = "Clipboard blocked. Try opening the source.";
pub const STICKER_SAVE_FAILED_MESSAGE: &str = "Sticker rendered but could not be saved.";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Could not save the meme.";

pub struct Session {
    catalog: Catalog,
    stats: CatalogStats,
    browse: BrowseState,
    studio: Studio,
    toasts: ToastRuntime,
    random: Box<dyn RandomSource>,
    clipboard: Box<dyn ClipboardBackend>,
    storage: Box<dyn DownloadStorage>,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        studio: Studio,
        toasts: ToastRuntime,
        clipboard: impl ClipboardBackend + 'static,
        storage: impl DownloadStorage + 'static,
    ) -> Self {
        let stats = aggregate_stats(&catalog);
        let browse = BrowseState::initial(&catalog);
        Self {
            catalog,
            stats,
            browse,
            studio,
            toasts,
            random: Box::new(ThreadRandom),
            clipboard: Box::new(clipboard),
            storage: Box::new(storage),
        }
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats
    }

    pub fn browse_state(&self) -> &BrowseState {
        &self.browse
    }

    pub fn studio(&self) -> &Studio {
        &self.studio
    }

    pub fn studio_mut(&mut self) -> &mut Studio {
        &mut self.studio
    }

    pub fn toasts(&self) -> &ToastRuntime {
        &self.toasts
    }

    pub fn visible(&self) -> VisibleList<'_> {
        compute_visible(&self.catalog, &self.browse)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.browse = self.browse.with_query(query);
    }

    pub fn set_vibe_filter(&mut self, vibe_filter: VibeFilter) {
        self.browse = self.browse.with_vibe_filter(vibe_filter);
    }

    pub fn wholesome_only(&mut self) {
        self.browse = self.browse.wholesome_only();
    }

    pub fn reset_filters(&mut self) {
        self.browse = self.browse.reset_filters();
    }

    pub fn surprise(&mut self) -> Option<&CatalogItem> {
        let pick = browse::surprise(&self.catalog, &self.browse, self.random.as_mut())?;
        self.browse = pick.state;
        self.toasts.show(pick.message, SURPRISE_TOAST_MS);
        self.catalog.get(pick.index)
    }

    /// Copies the item's image link. Failures only surface as a toast.
    pub fn copy_link(&self, item: &CatalogItem) -> ClipboardResult<()> {
        let result = self.clipboard.copy_text(&item.image);
        match &result {
            Ok(()) => {
                self.toasts.show(COPY_SUCCESS_MESSAGE, CLIPBOARD_TOAST_MS);
            }
            Err(err) => {
                tracing::warn!(title = %item.title, %err, "copy failed");
                self.toasts.show(COPY_BLOCKED_MESSAGE, CLIPBOARD_TOAST_MS);
            }
        }
        result
    }

    /// Starts a request. The studio stays in `Requesting` and rejects
    /// further triggers until [`Session::complete_generation`] runs.
    pub fn begin_generation(&mut self, kind: RenderKind) -> GenerationResult<PendingGeneration> {
        let result = self.studio.begin(kind);
        if let Err(err) = &result {
            tracing::debug!(?kind, %err, "generation not started");
        }
        result
    }

    /// Settles a request started with [`Session::begin_generation`] and
    /// publishes its toast.
    pub fn complete_generation(
        &mut self,
        pending: PendingGeneration,
        outcome: RenderResult<Vec<u8>>,
    ) -> GenerationResult<GenerationOutcome> {
        let kind = pending.kind();
        let result = self.studio.complete(pending, outcome, self.storage.as_ref());
        self.report(kind, &result);
        result
    }

    pub async fn generate<B: RenderBackend>(
        &mut self,
        backend: &B,
    ) -> GenerationResult<GenerationOutcome> {
        self.run(RenderKind::Flatten, backend).await
    }

    pub async fn generate_sticker<B: RenderBackend>(
        &mut self,
        backend: &B,
    ) -> GenerationResult<GenerationOutcome> {
        self.run(RenderKind::Sticker, backend).await
    }

    pub fn download(&self) -> StorageResult<Option<PathBuf>> {
        let result = self.studio.download(self.storage.as_ref());
        if let Err(err) = &result {
            tracing::warn!(%err, "download failed");
            self.toasts.show(DOWNLOAD_FAILED_MESSAGE, STUDIO_TOAST_MS);
        }
        result
    }

    async fn run<B: RenderBackend>(
        &mut self,
        kind: RenderKind,
        backend: &B,
    ) -> GenerationResult<GenerationOutcome> {
        let pending = self.begin_generation(kind)?;
        let outcome = backend.render(kind, pending.request()).await;
        self.complete_generation(pending, outcome)
    }

    fn report(&self, kind: RenderKind, result: &GenerationResult<GenerationOutcome>) {
        let message = match result {
            Ok(_) => kind.success_message(),
            Err(GenerationError::Save { .. }) => STICKER_SAVE_FAILED_MESSAGE,
            Err(err) if err.is_user_visible() => kind.failure_message(),
            Err(_) => return,
        };
        self.toasts.show(message, STUDIO_TOAST_MS);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("catalog", &self.catalog.len())
            .field("browse", &self.browse)
            .field("studio", &self.studio)
            .field("toasts", &self.toasts)
            .finish_non_exhaustive()
    }
}
