//! Toast-style notifications. A loading toast is later replaced in place by
//! its success or error outcome, keyed by [`ToastId`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Loading, message.into())
    }

    pub fn success(&mut self, id: ToastId, message: impl Into<String>) {
        self.replace(id, ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, id: ToastId, message: impl Into<String>) {
        self.replace(id, ToastLevel::Error, message.into());
    }

    /// Standalone error not tied to a pending operation
    pub fn error_now(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Error, message.into())
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Take every toast that is no longer loading, leaving pending ones in place
    pub fn drain_settled(&mut self) -> Vec<Toast> {
        let (settled, pending): (Vec<_>, Vec<_>) = self
            .toasts
            .drain(..)
            .partition(|t| t.level != ToastLevel::Loading);
        self.toasts = pending;
        settled
    }

    fn push(&mut self, level: ToastLevel, message: String) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.push(Toast { id, level, message });
        id
    }

    fn replace(&mut self, id: ToastId, level: ToastLevel, message: String) {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.level = level;
                toast.message = message;
            }
            None => self.toasts.push(Toast { id, level, message }),
        }
    }
}
