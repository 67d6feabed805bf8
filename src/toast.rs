//! Transient notifications.

use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    // ---
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    // ---
    pub id: u64,
    /// Translation key of the message.
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    // ---
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    // ---
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        // ---
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            message: message.into(),
            kind,
            created_at: Instant::now(),
        };
        tracing::debug!("toast {:?}: {}", toast.kind, toast.message);
        self.items.push(toast);
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Info)
    }

    /// Drops toasts older than [`TOAST_TTL`] at `now`; returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        // ---
        let before = self.items.len();
        self.items
            .retain(|t| now.saturating_duration_since(t.created_at) < TOAST_TTL);
        before - self.items.len()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.items
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.last()
    }

    /// True when any visible toast carries `message`.
    pub fn contains(&self, message: &str) -> bool {
        self.items.iter().any(|t| t.message == message)
    }
}
