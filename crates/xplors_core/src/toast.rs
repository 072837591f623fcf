use std::time::Duration;

/// How long a toast stays up unless dismissed.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ToastQueue {
    next_id: ToastId,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub(crate) fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    /// Returns false for ids that are not (or no longer) queued.
    pub(crate) fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub(crate) fn as_slice(&self) -> &[Toast] {
        &self.toasts
    }
}
