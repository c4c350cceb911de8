//! Transient user-facing status messages.
//!
//! At most one notification is visible at a time: a new `notify` replaces
//! the current one and restarts the expiry window. The expiry timer is a
//! single owned task handle, re-armed on every call and aborted when the
//! channel is dropped, so repeated notifications never leak timers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default visibility window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Owner side of the notification state.
///
/// Observers read the visible notification via [`current`](Self::current)
/// or await changes through [`subscribe`](Self::subscribe).
pub struct NotificationChannel {
    ttl: Duration,
    state_tx: watch::Sender<Option<Notification>>,
    expiry: Option<JoinHandle<()>>,
    /// Versions each arm of the timer so a superseded timer that slips past
    /// its abort cannot clear a newer notification.
    generation: Arc<AtomicU64>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let (state_tx, _) = watch::channel(None);
        Self {
            ttl,
            state_tx,
            expiry: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Show a notification, replacing any visible one and restarting the
    /// expiry window.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.disarm();
        let generation = Arc::clone(&self.generation);
        let armed_at = generation.fetch_add(1, Ordering::AcqRel) + 1;

        self.state_tx.send_replace(Some(Notification {
            message: message.into(),
            kind,
        }));

        let state_tx = self.state_tx.clone();
        let ttl = self.ttl;
        self.expiry = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            state_tx.send_if_modified(|current| {
                if generation.load(Ordering::Acquire) == armed_at {
                    current.take().is_some()
                } else {
                    false
                }
            });
        }));
    }

    /// Show a notification that stays until replaced or cleared.
    pub fn notify_sticky(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.disarm();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.state_tx.send_replace(Some(Notification {
            message: message.into(),
            kind,
        }));
    }

    /// Clear the visible notification immediately.
    pub fn clear(&mut self) {
        self.disarm();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.state_tx.send_replace(None);
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.state_tx.borrow().clone()
    }

    /// Watch visibility changes without polling.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.state_tx.subscribe()
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}
