use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Owner,
    Staff,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Owner => write!(f, "owner"),
            StaffRole::Staff => write!(f, "staff"),
        }
    }
}

/// Row in `vendor_staff`: one portal account working under one vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorStaff {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vendor_id: Uuid,
    pub display_name: String,
    pub phone: Option<String>,
    pub timezone: String,
    pub role: StaffRole,
    pub notifications_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// The identity facts the rest of the portal works from once a signed-in
/// user has been matched to a staff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffIdentity {
    pub user_id: Uuid,
    pub staff_id: Uuid,
    pub vendor_id: Uuid,
    pub role: StaffRole,
}

impl From<&VendorStaff> for StaffIdentity {
    fn from(staff: &VendorStaff) -> Self {
        StaffIdentity {
            user_id: staff.user_id,
            staff_id: staff.id,
            vendor_id: staff.vendor_id,
            role: staff.role,
        }
    }
}

impl StaffIdentity {
    /// Owners see everything addressed to the vendor; staff see only
    /// rows addressed to them.
    pub fn recipient(&self) -> Recipient {
        match self.role {
            StaffRole::Owner => Recipient::Vendor(self.vendor_id),
            StaffRole::Staff => Recipient::Staff(self.staff_id),
        }
    }
}

/// Notification addressing: the column and value that scope queries and
/// realtime channels for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Vendor(Uuid),
    Staff(Uuid),
}

impl Recipient {
    pub fn filter_column(&self) -> &'static str {
        match self {
            Recipient::Vendor(_) => "vendor_id",
            Recipient::Staff(_) => "staff_id",
        }
    }

    pub fn filter_value(&self) -> Uuid {
        match self {
            Recipient::Vendor(id) | Recipient::Staff(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStaffMember {
    pub user_id: Uuid,
    pub vendor_id: Uuid,
    pub display_name: String,
    pub role: StaffRole,
    pub timezone: String,
    pub notifications_enabled: bool,
}

impl NewStaffMember {
    pub fn new(user_id: Uuid, vendor_id: Uuid, display_name: &str) -> Self {
        NewStaffMember {
            user_id,
            vendor_id,
            display_name: display_name.to_string(),
            role: StaffRole::Staff,
            timezone: "UTC".to_string(),
            notifications_enabled: true,
        }
    }
}
