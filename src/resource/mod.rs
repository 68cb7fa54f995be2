//! Revocable handles to in-memory image payloads.

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use image::{ImageFormat, ImageReader};

const URL_SCHEME: &str = "blob:memedrop/";

/// Owned handle to a registered payload. Released only through
/// [`ObjectUrlRegistry::revoke`].
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl {
    id: u64,
    url: String,
}

impl ObjectUrl {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub payload: Vec<u8>,
    pub format: Option<ImageFormat>,
    pub dimensions: Option<(u32, u32)>,
}

impl Blob {
    fn sniff(payload: Vec<u8>) -> Self {
        let format = image::guess_format(&payload).ok();
        let dimensions = ImageReader::new(Cursor::new(payload.as_slice()))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());
        Self {
            payload,
            format,
            dimensions,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream")
    }
}

#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next_id: u64,
    live: HashMap<u64, Blob>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, payload: Vec<u8>) -> ObjectUrl {
        self.next_id = self.next_id.saturating_add(1);
        let id = self.next_id;
        let blob = Blob::sniff(payload);
        tracing::debug!(
            id,
            bytes = blob.payload.len(),
            mime = blob.mime_type(),
            "object url created"
        );
        self.live.insert(id, blob);
        ObjectUrl {
            id,
            url: format!("{URL_SCHEME}{id}"),
        }
    }

    pub fn resolve(&self, handle: &ObjectUrl) -> Option<&Blob> {
        self.live.get(&handle.id)
    }

    /// Consumes the handle and drops its payload. Returns whether it was live.
    pub fn revoke(&mut self, handle: ObjectUrl) -> bool {
        let released = self.live.remove(&handle.id).is_some();
        tracing::debug!(id = handle.id, released, "object url revoked");
        released
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image::RgbaImage::new(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encode png");
    buffer.into_inner()
}
