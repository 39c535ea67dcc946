use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{ApiClient, Filter, SelectQuery};
use crate::error::Result;

/// The dependent queries behind the dashboard cards.
#[async_trait]
pub trait DashboardQueries: Send + Sync {
    async fn open_task_count(&self, vendor_id: Uuid) -> Result<i64>;
    async fn availability_count(&self, staff_id: Uuid) -> Result<i64>;
    async fn assigned_services(&self, staff_id: Uuid) -> Result<Vec<String>>;
}

#[derive(Clone)]
pub struct RestDashboardQueries {
    api: Arc<ApiClient>,
}

impl RestDashboardQueries {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceRow {
    name: String,
}

/// Join row of `vendor_service_staff` with the service row embedded; the
/// embed is null when the referenced service is gone.
#[derive(Debug, Deserialize)]
struct ServiceAssignment {
    vendor_services: Option<ServiceRow>,
}

#[async_trait]
impl DashboardQueries for RestDashboardQueries {
    async fn open_task_count(&self, vendor_id: Uuid) -> Result<i64> {
        self.api
            .count(
                "vendor_tasks",
                &[
                    Filter::eq("vendor_id", vendor_id),
                    Filter::eq("status", "open"),
                ],
            )
            .await
    }

    async fn availability_count(&self, staff_id: Uuid) -> Result<i64> {
        self.api
            .count(
                "vendor_availability",
                &[
                    Filter::eq("staff_id", staff_id),
                    Filter::eq("is_available", true),
                ],
            )
            .await
    }

    async fn assigned_services(&self, staff_id: Uuid) -> Result<Vec<String>> {
        let assignments: Vec<ServiceAssignment> = self
            .api
            .select(
                &SelectQuery::new("vendor_service_staff")
                    .columns("vendor_services(name)")
                    .filter(Filter::eq("staff_id", staff_id)),
            )
            .await?;

        Ok(assignments
            .into_iter()
            .filter_map(|assignment| assignment.vendor_services)
            .map(|service| service.name)
            .collect())
    }
}
