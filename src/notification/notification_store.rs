use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::notification_models::Notification;
use super::notification_repository::NotificationGateway;
use crate::realtime::{ChangeFeed, ChannelFilter};
use crate::staff::Recipient;

struct StoreState {
    recipient: Option<Recipient>,
    entries: Vec<Notification>,
    unread: usize,
}

/// Shared with the watcher task; the owning handle keeps the
/// subscription lifecycle out of here so the two never form a cycle.
struct StoreInner {
    gateway: Arc<dyn NotificationGateway>,
    state: RwLock<StoreState>,
    unread_tx: watch::Sender<usize>,
}

impl StoreInner {
    fn recipient(&self) -> Option<Recipient> {
        self.state.read().recipient
    }

    fn publish(&self) {
        let unread = self.state.read().unread;
        self.unread_tx.send_replace(unread);
    }

    async fn fetch(&self) {
        let Some(recipient) = self.recipient() else {
            return;
        };
        match self.gateway.list_for(&recipient).await {
            Ok(entries) => {
                {
                    let mut state = self.state.write();
                    state.unread = entries.iter().filter(|entry| !entry.is_read).count();
                    state.entries = entries;
                }
                self.publish();
            }
            Err(err) => tracing::error!("Notification fetch failed: {}", err),
        }
    }

    async fn mark_as_read(&self, id: Uuid) {
        // The local mutation goes through even when the remote update
        // fails; the next successful fetch reconciles.
        if let Err(err) = self.gateway.mark_read(id).await {
            tracing::error!("Remote mark-as-read failed for {}: {}", id, err);
        }
        {
            let mut state = self.state.write();
            if let Some(entry) = state.entries.iter_mut().find(|entry| entry.id == id) {
                entry.is_read = true;
            }
            state.unread = state.entries.iter().filter(|entry| !entry.is_read).count();
        }
        self.publish();
    }

    async fn mark_all_as_read(&self) {
        let Some(recipient) = self.recipient() else {
            return;
        };
        if let Err(err) = self.gateway.mark_all_read(&recipient).await {
            tracing::error!("Remote mark-all-as-read failed: {}", err);
            return;
        }
        {
            let mut state = self.state.write();
            for entry in state.entries.iter_mut() {
                entry.is_read = true;
            }
            state.unread = 0;
        }
        self.publish();
    }
}

struct Watcher {
    handle: JoinHandle<()>,
}

/// Local mirror of the signed-in recipient's notifications. Remote
/// failures are logged and swallowed; callers only ever observe the
/// local state and the unread watch channel.
pub struct NotificationStore {
    inner: Arc<StoreInner>,
    feed: Arc<dyn ChangeFeed>,
    watcher: Mutex<Option<Watcher>>,
}

impl NotificationStore {
    pub fn new(gateway: Arc<dyn NotificationGateway>, feed: Arc<dyn ChangeFeed>) -> Self {
        let (unread_tx, _) = watch::channel(0);
        NotificationStore {
            inner: Arc::new(StoreInner {
                gateway,
                state: RwLock::new(StoreState {
                    recipient: None,
                    entries: Vec::new(),
                    unread: 0,
                }),
                unread_tx,
            }),
            feed,
            watcher: Mutex::new(None),
        }
    }

    /// Points the store at a new recipient: the previous watcher is torn
    /// down first, local state is reset, then a fresh subscription and an
    /// initial fetch bring the new recipient up. `None` leaves the store
    /// empty with no subscription.
    pub async fn set_recipient(&self, recipient: Option<Recipient>) {
        self.stop_watcher().await;

        {
            let mut state = self.inner.state.write();
            state.recipient = recipient;
            state.entries.clear();
            state.unread = 0;
        }
        self.inner.publish();

        let Some(recipient) = recipient else {
            return;
        };

        let filter = ChannelFilter::eq(
            "notifications",
            recipient.filter_column(),
            recipient.filter_value(),
        );
        match self.feed.subscribe(filter).await {
            Ok(mut subscription) => {
                let inner = self.inner.clone();
                let handle = tokio::spawn(async move {
                    while subscription.next_event().await.is_some() {
                        inner.fetch().await;
                    }
                });
                *self.watcher.lock() = Some(Watcher { handle });
            }
            Err(err) => tracing::error!("Notification subscription failed: {}", err),
        }

        self.inner.fetch().await;
    }

    pub async fn fetch(&self) {
        self.inner.fetch().await;
    }

    pub async fn mark_as_read(&self, id: Uuid) {
        self.inner.mark_as_read(id).await;
    }

    pub async fn mark_all_as_read(&self) {
        self.inner.mark_all_as_read().await;
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.state.read().entries.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.inner.state.read().unread
    }

    /// Receives the unread count after every state change; `borrow()`
    /// gives the current value without waiting.
    pub fn unread_updates(&self) -> watch::Receiver<usize> {
        self.inner.unread_tx.subscribe()
    }

    pub async fn close(&self) {
        self.stop_watcher().await;
    }

    async fn stop_watcher(&self) {
        let watcher = self.watcher.lock().take();
        if let Some(watcher) = watcher {
            watcher.handle.abort();
            let _ = watcher.handle.await;
        }
    }
}

impl Drop for NotificationStore {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.lock().take() {
            watcher.handle.abort();
        }
    }
}
