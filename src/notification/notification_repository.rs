use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use super::notification_models::Notification;
use crate::api::{ApiClient, Filter, SelectQuery};
use crate::error::Result;
use crate::staff::Recipient;

/// Remote side of the notification store.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn list_for(&self, recipient: &Recipient) -> Result<Vec<Notification>>;
    async fn mark_read(&self, id: Uuid) -> Result<()>;
    async fn mark_all_read(&self, recipient: &Recipient) -> Result<()>;
}

#[derive(Clone)]
pub struct RestNotificationRepository {
    api: Arc<ApiClient>,
}

impl RestNotificationRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NotificationGateway for RestNotificationRepository {
    async fn list_for(&self, recipient: &Recipient) -> Result<Vec<Notification>> {
        self.api
            .select(
                &SelectQuery::new("notifications")
                    .filter(Filter::eq(
                        recipient.filter_column(),
                        recipient.filter_value(),
                    ))
                    .order_desc("created_at"),
            )
            .await
    }

    async fn mark_read(&self, id: Uuid) -> Result<()> {
        self.api
            .update(
                "notifications",
                &[Filter::eq("id", id)],
                &json!({"is_read": true}),
            )
            .await
    }

    async fn mark_all_read(&self, recipient: &Recipient) -> Result<()> {
        self.api
            .update(
                "notifications",
                &[
                    Filter::eq(recipient.filter_column(), recipient.filter_value()),
                    Filter::eq("is_read", false),
                ],
                &json!({"is_read": true}),
            )
            .await
    }
}
