// ── Ephemeral user-facing notifications ──
//
// Insertion-ordered queue of transient messages. Each item expires
// independently after a fixed TTL; expiry of one item never affects
// the others. Snapshots are broadcast through a `watch` channel.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::trace;
use uuid::Uuid;

/// How long each notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
}

/// A transient user-facing message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Insertion-ordered, self-expiring notification queue.
pub struct NotificationQueue {
    items: Mutex<Vec<Arc<Notification>>>,
    snapshot: watch::Sender<Arc<Vec<Arc<Notification>>>>,
    ttl: Duration,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    /// Queue with a custom TTL (tests).
    pub fn with_ttl(ttl: Duration) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            items: Mutex::new(Vec::new()),
            snapshot,
            ttl,
        }
    }

    /// Append a notification and schedule its individual expiry.
    ///
    /// Must be called from within a tokio runtime (the expiry timer is
    /// a spawned task).
    pub fn push(self: &Arc<Self>, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Arc::new(Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        });
        let id = notification.id;

        {
            let mut items = self.items.lock().expect("notification lock poisoned");
            items.push(notification);
        }
        self.rebuild_snapshot();

        let queue = Arc::clone(self);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            queue.expire(id);
        });

        id
    }

    /// Remove exactly one item by id. No-op when already expired.
    pub fn expire(&self, id: Uuid) {
        let removed = {
            let mut items = self.items.lock().expect("notification lock poisoned");
            let before = items.len();
            items.retain(|n| n.id != id);
            before != items.len()
        };
        if removed {
            trace!(%id, "notification expired");
            self.rebuild_snapshot();
        }
    }

    /// Current snapshot (cheap `Arc` clone), insertion-ordered.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Notification>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Notification>>>> {
        self.snapshot.subscribe()
    }

    fn rebuild_snapshot(&self) {
        let items = self
            .items
            .lock()
            .expect("notification lock poisoned")
            .clone();
        self.snapshot.send_modify(|snap| *snap = Arc::new(items));
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
