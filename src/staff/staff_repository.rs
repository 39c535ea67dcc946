use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::staff_models::{NewStaffMember, VendorStaff};
use crate::api::{ApiClient, Filter, SelectQuery};
use crate::error::Result;

/// Directory of `vendor_staff` rows, keyed by the signed-in user.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VendorStaff>>;
    async fn update_profile(&self, staff_id: Uuid, patch: Value) -> Result<()>;
    async fn enroll(&self, member: NewStaffMember) -> Result<()>;
}

#[derive(Clone)]
pub struct RestStaffDirectory {
    api: Arc<ApiClient>,
}

impl RestStaffDirectory {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StaffDirectory for RestStaffDirectory {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VendorStaff>> {
        let rows: Vec<VendorStaff> = self
            .api
            .select(
                &SelectQuery::new("vendor_staff")
                    .filter(Filter::eq("user_id", user_id))
                    .limit(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_profile(&self, staff_id: Uuid, patch: Value) -> Result<()> {
        self.api
            .update("vendor_staff", &[Filter::eq("id", staff_id)], &patch)
            .await
    }

    async fn enroll(&self, member: NewStaffMember) -> Result<()> {
        self.api.insert("vendor_staff", &[member]).await
    }
}
