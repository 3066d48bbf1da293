//! Notification sink used to surface fetch failures to the user.
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            message: message.into(),
        }
    }
}

/// Injected receiver for user-facing alerts.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Single reusable alert slot: holds only the most recent notification.
#[derive(Debug, Default)]
pub struct AlertChannel {
    current: Mutex<Option<Notification>>,
    shown: Mutex<usize>,
}

impl AlertChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Notification> {
        self.current.lock().map(|g| g.clone()).unwrap_or(None)
    }

    /// Number of notifications received so far.
    pub fn shown(&self) -> usize {
        self.shown.lock().map(|g| *g).unwrap_or(0)
    }

    pub fn dismiss(&self) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = None;
        }
    }
}

impl NotificationSink for AlertChannel {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = Some(notification);
        }
        if let Ok(mut shown) = self.shown.lock() {
            *shown += 1;
        }
    }
}

/// Sink for headless use: writes alerts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        error!(severity = ?notification.severity, "{}", notification.message);
    }
}
