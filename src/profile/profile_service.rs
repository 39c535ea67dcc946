use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::profile_models::{ProfileSettings, UpdateProfileRequest};
use crate::error::Result;
use crate::staff::StaffDirectory;

/// Settings behind the profile form. Unlike the notification store this
/// surface propagates errors; the form renders them inline.
#[derive(Clone)]
pub struct ProfileService {
    directory: Arc<dyn StaffDirectory>,
}

impl ProfileService {
    pub fn new(directory: Arc<dyn StaffDirectory>) -> Self {
        Self { directory }
    }

    pub async fn settings(&self, user_id: Uuid) -> Result<Option<ProfileSettings>> {
        let staff = self.directory.find_by_user(user_id).await?;
        Ok(staff.as_ref().map(ProfileSettings::from))
    }

    pub async fn update(&self, staff_id: Uuid, request: &UpdateProfileRequest) -> Result<()> {
        request.validate()?;
        if request.is_empty() {
            return Ok(());
        }
        self.directory
            .update_profile(staff_id, request.to_patch())
            .await
    }
}
