use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{ToastSink, ToastSlot};

/// Toast slot with timer-driven expiry.
///
/// Inside a tokio runtime each publish aborts the pending timer and arms a
/// new one; the timer still checks its generation before clearing. Without
/// a runtime no timer is armed and reads expire the slot against its
/// deadline instead.
#[derive(Clone)]
pub struct ToastRuntime {
    slot: Arc<Mutex<ToastSlot>>,
    pending: Rc<RefCell<Option<JoinHandle<()>>>>,
    sinks: Vec<Rc<dyn ToastSink>>,
}

fn lock(slot: &Mutex<ToastSlot>) -> MutexGuard<'_, ToastSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ToastRuntime {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::new())),
            pending: Rc::new(RefCell::new(None)),
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl ToastSink + 'static) -> Self {
        self.sinks.push(Rc::new(sink));
        self
    }

    pub fn show(&self, message: impl Into<String>, duration_ms: u32) -> u64 {
        let message = message.into();
        let duration = Duration::from_millis(u64::from(duration_ms));
        let generation = lock(&self.slot).publish(message.clone(), Instant::now(), duration);
        tracing::debug!(generation, duration_ms, %message, "toast published");

        for sink in &self.sinks {
            sink.toast_shown(&message, duration_ms);
        }

        if let Some(previous) = self.pending.borrow_mut().take() {
            previous.abort();
        }

        let Ok(handle) = Handle::try_current() else {
            tracing::trace!(generation, "no runtime; toast expires on read");
            return generation;
        };
        let slot = Arc::clone(&self.slot);
        let timer = handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if lock(&slot).expire(generation) {
                tracing::trace!(generation, "toast expired");
            }
        });
        *self.pending.borrow_mut() = Some(timer);

        generation
    }

    pub fn current_message(&self) -> Option<String> {
        let mut slot = lock(&self.slot);
        slot.expire_due(Instant::now());
        slot.message().map(str::to_string)
    }

    pub fn generation(&self) -> u64 {
        lock(&self.slot).generation()
    }
}

impl Default for ToastRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToastRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastRuntime")
            .field("slot", &*lock(&self.slot))
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
