pub mod client;
pub mod types;

pub use client::RealtimeClient;
pub use types::{ChangeAction, ChangeEvent, ChannelFilter};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// Push side of the hosted service: a subscription follows row changes
/// on one table, filtered to one recipient column.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    async fn subscribe(&self, filter: ChannelFilter) -> Result<Subscription>;
}

/// Stream of change events for a single topic. Dropping the subscription
/// detaches it from the feed.
pub struct Subscription {
    events: mpsc::UnboundedReceiver<ChangeEvent>,
    _guard: SubscriptionGuard,
}

impl Subscription {
    pub fn new(
        events: mpsc::UnboundedReceiver<ChangeEvent>,
        on_drop: impl FnOnce() + Send + 'static,
    ) -> Self {
        Subscription {
            events,
            _guard: SubscriptionGuard {
                on_drop: Some(Box::new(on_drop)),
            },
        }
    }

    pub async fn next_event(&mut self) -> Option<ChangeEvent> {
        self.events.recv().await
    }
}

struct SubscriptionGuard {
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(cleanup) = self.on_drop.take() {
            cleanup();
        }
    }
}
