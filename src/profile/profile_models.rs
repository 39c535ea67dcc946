use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::staff::VendorStaff;

/// The settings form, mapped straight off the `vendor_staff` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSettings {
    pub staff_id: Uuid,
    pub display_name: String,
    pub phone: Option<String>,
    pub timezone: String,
    pub notifications_enabled: bool,
}

impl From<&VendorStaff> for ProfileSettings {
    fn from(staff: &VendorStaff) -> Self {
        ProfileSettings {
            staff_id: staff.id,
            display_name: staff.display_name.clone(),
            phone: staff.phone.clone(),
            timezone: staff.timezone.clone(),
            notifications_enabled: staff.notifications_enabled,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub display_name: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub timezone: Option<String>,
    pub notifications_enabled: Option<bool>,
}

impl UpdateProfileRequest {
    /// Partial patch: absent fields stay absent so the update never
    /// clobbers columns the form did not touch.
    pub fn to_patch(&self) -> Value {
        let mut patch = Map::new();
        if let Some(display_name) = &self.display_name {
            patch.insert(
                "display_name".to_string(),
                Value::String(display_name.clone()),
            );
        }
        if let Some(phone) = &self.phone {
            patch.insert("phone".to_string(), Value::String(phone.clone()));
        }
        if let Some(timezone) = &self.timezone {
            patch.insert("timezone".to_string(), Value::String(timezone.clone()));
        }
        if let Some(enabled) = self.notifications_enabled {
            patch.insert("notifications_enabled".to_string(), Value::Bool(enabled));
        }
        Value::Object(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.phone.is_none()
            && self.timezone.is_none()
            && self.notifications_enabled.is_none()
    }
}
