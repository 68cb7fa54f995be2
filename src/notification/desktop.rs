use super::ToastSink;

const APP_NAME: &str = "memedrop";

/// Mirrors toasts as desktop notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl ToastSink for DesktopNotifier {
    fn toast_shown(&self, message: &str, duration_ms: u32) {
        send(message, duration_ms);
    }
}

pub fn send(body: impl Into<String>, timeout_ms: u32) {
    let body = body.into();
    if let Err(err) = notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary("Meme lab")
        .body(&body)
        .timeout(notify_rust::Timeout::Milliseconds(timeout_ms))
        .show()
    {
        tracing::warn!("desktop notification failed: {err}");
    }
}
