use tracing::{error, info, warn};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Fire-and-forget sink for user-facing messages.
///
/// UI hosts back this with a toast bar or status line; nothing in the
/// session depends on a return value.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, text: &str);
}

/// Notifier that forwards notices to the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NoticeKind, text: &str) {
        match kind {
            NoticeKind::Success => info!(notice = text, "session notice"),
            NoticeKind::Warning => warn!(notice = text, "session notice"),
            NoticeKind::Error => error!(notice = text, "session notice"),
        }
    }
}
