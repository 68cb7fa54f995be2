//! Single-slot, auto-expiring toast messages.

mod desktop;
mod runtime;

use std::time::Duration;

use tokio::time::Instant;

pub use desktop::{send, DesktopNotifier};
pub use runtime::ToastRuntime;

pub const CLIPBOARD_TOAST_MS: u32 = 1_600;
pub const STUDIO_TOAST_MS: u32 = 2_000;

/// Observer notified of every published toast and how long it stays up.
pub trait ToastSink {
    fn toast_shown(&self, message: &str, duration_ms: u32);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub generation: u64,
    pub created_at: Instant,
    pub expires_at: Instant,
}

/// Holds at most one toast. The latest publish owns the slot; expiry for an
/// older generation is ignored.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<Toast>,
    generation: u64,
}

impl ToastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, message: impl Into<String>, now: Instant, duration: Duration) -> u64 {
        self.generation = self.generation.saturating_add(1);
        self.current = Some(Toast {
            message: message.into(),
            generation: self.generation,
            created_at: now,
            expires_at: now + duration,
        });
        self.generation
    }

    /// Clears the slot if `generation` still owns it. Returns whether it cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(toast) if toast.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Poll-style expiry for hosts that drive their own clock.
    pub fn expire_due(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(toast) if now >= toast.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|toast| toast.message.as_str())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
