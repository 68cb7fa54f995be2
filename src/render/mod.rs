//! Contract with the external meme rendering service.

mod http;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpRenderClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Text flattened onto the template, returned as PNG.
    Flatten,
    /// 512x512 WebP sticker.
    Sticker,
}

impl RenderKind {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Flatten => "/api/memes/generate/",
            Self::Sticker => "/api/memes/sticker/",
        }
    }

    pub const fn download_filename(self) -> &'static str {
        match self {
            Self::Flatten => "meme.png",
            Self::Sticker => "sticker.webp",
        }
    }

    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Flatten => "Meme generated!",
            Self::Sticker => "WhatsApp sticker downloaded!",
        }
    }

    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Flatten => "Failed to generate meme. Is the backend running?",
            Self::Sticker => "Failed to create sticker. Is the backend running?",
        }
    }
}

/// JSON body shared by both rendering endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub image_url: String,
    pub top_text: String,
    pub bottom_text: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rendering service error ({status}): {body}")]
    Status { status: u16, body: String },
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// One-shot, non-cancellable rendering call returning the image payload.
pub trait RenderBackend {
    fn render(
        &self,
        kind: RenderKind,
        request: &RenderRequest,
    ) -> impl Future<Output = RenderResult<Vec<u8>>>;
}
