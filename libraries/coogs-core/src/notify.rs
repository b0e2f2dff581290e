//! Toast notifications
//!
//! A global publish-subscribe channel for transient UI notifications. Any
//! component holding a `ToastPublisher` can announce a toast; every view that
//! subscribed to the bus receives it.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// Default on-screen time for a toast
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Informational
    Info,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    /// Unique toast id (for dismissal)
    pub id: Uuid,
    /// Severity
    pub kind: ToastKind,
    /// Message shown to the user
    pub message: String,
    /// How long the toast stays visible
    pub duration_ms: u64,
}

impl Toast {
    /// Create a toast of the given kind
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    /// Success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    /// Error toast
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    /// Informational toast
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    /// Override the display duration
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Anything that can announce toasts
pub trait ToastPublisher: Send + Sync {
    /// Publish a toast; never fails and never blocks
    fn publish(&self, toast: Toast);
}

/// Broadcast channel for toasts
///
/// Publishing never blocks. Slow subscribers lag and lose the oldest toasts
/// once `capacity` is exceeded.
#[derive(Clone)]
pub struct ToastBus {
    tx: broadcast::Sender<Toast>,
    capacity: usize,
}

impl ToastBus {
    /// Create a bus buffering up to `capacity` toasts per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            capacity: capacity.max(1),
        }
    }

    /// Subscribe to all future toasts
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }

    /// Emit a toast, returning the number of subscribers reached
    ///
    /// Returns `Err` when nobody is listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, toast: Toast) -> Result<usize, broadcast::error::SendError<Toast>> {
        self.tx.send(toast)
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ToastPublisher for ToastBus {
    fn publish(&self, toast: Toast) {
        let kind = toast.kind;
        match self.tx.send(toast) {
            Ok(receivers) => trace!(?kind, receivers, "Toast published"),
            Err(_) => trace!(?kind, "Toast dropped, no subscribers"),
        }
    }
}
