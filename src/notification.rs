//! Notification toasts
//!
//! Fire-and-forget messages shown in the top-right corner. A toast slides in
//! shortly after it is raised, stays for a fixed delay, then slides out and
//! is removed.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Delay before a new toast slides into view
pub const SLIDE_IN_DELAY: Duration = Duration::from_millis(100);

/// How long a toast stays before it starts leaving
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Slide-out transition length; the toast is removed once it completes
pub const SLIDE_OUT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Background colour of the toast
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Info => "#3498db",
            Severity::Success => "#27ae60",
            Severity::Error => "#e74c3c",
        }
    }

    /// Class list of the toast element
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Info => "notification notification-info",
            Severity::Success => "notification notification-success",
            Severity::Error => "notification notification-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Anything that can display a toast. Callers never wait on it.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);

    fn send(&self, notification: &Notification) {
        self.notify(&notification.message, notification.severity);
    }
}

// ============================================================================
// Toast Queue
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    pub raised_at: Instant,
}

#[derive(Debug)]
struct QueueInner {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Toasts currently on screen, with their timed lifecycle
#[derive(Debug)]
pub struct ToastQueue {
    dismiss_after: Duration,
    inner: Mutex<QueueInner>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl ToastQueue {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            inner: Mutex::new(QueueInner {
                next_id: 1,
                toasts: Vec::new(),
            }),
        }
    }

    /// Total time a toast spends in the queue
    pub fn lifetime(&self) -> Duration {
        self.dismiss_after + SLIDE_OUT
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Raise a toast at `now`. Toasts already expired at `now` are dropped first.
    pub fn push_at(&self, notification: Notification, now: Instant) -> u64 {
        let lifetime = self.lifetime();
        let mut inner = self.lock();
        inner
            .toasts
            .retain(|t| now.saturating_duration_since(t.raised_at) < lifetime);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.toasts.push(Toast {
            id,
            notification,
            raised_at: now,
        });
        id
    }

    /// Lifecycle phase at `now`, `None` once the toast has been removed
    pub fn phase(&self, toast: &Toast, now: Instant) -> Option<ToastPhase> {
        let age = now.saturating_duration_since(toast.raised_at);
        if age >= self.lifetime() {
            None
        } else if age >= self.dismiss_after {
            Some(ToastPhase::Leaving)
        } else if age >= SLIDE_IN_DELAY {
            Some(ToastPhase::Shown)
        } else {
            Some(ToastPhase::Entering)
        }
    }

    /// Drop expired toasts, returning how many were removed
    pub fn prune(&self, now: Instant) -> usize {
        let lifetime = self.lifetime();
        let mut inner = self.lock();
        let before = inner.toasts.len();
        inner
            .toasts
            .retain(|t| now.saturating_duration_since(t.raised_at) < lifetime);
        before - inner.toasts.len()
    }

    /// Toasts still on screen at `now`, oldest first
    pub fn active(&self, now: Instant) -> Vec<Toast> {
        self.prune(now);
        self.lock().toasts.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str, severity: Severity) {
        self.push_at(Notification::new(message, severity), Instant::now());
    }
}
