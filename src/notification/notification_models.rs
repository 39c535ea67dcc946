use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum NotificationKind {
    Task,
    Booking,
    Availability,
    System,
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "task" => NotificationKind::Task,
            "booking" => NotificationKind::Booking,
            "availability" => NotificationKind::Availability,
            _ => NotificationKind::System,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Task => write!(f, "task"),
            NotificationKind::Booking => write!(f, "booking"),
            NotificationKind::Availability => write!(f, "availability"),
            NotificationKind::System => write!(f, "system"),
        }
    }
}

/// Row in `notifications`. The backend addresses each row either to a
/// whole vendor or to a single staff member; exactly one recipient
/// column is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub vendor_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_kind_display() {
        assert_eq!(NotificationKind::Task.to_string(), "task");
        assert_eq!(NotificationKind::Booking.to_string(), "booking");
        assert_eq!(NotificationKind::Availability.to_string(), "availability");
        assert_eq!(NotificationKind::System.to_string(), "system");
    }

    #[test]
    fn test_unknown_kind_decodes_as_system() {
        let kind: NotificationKind = serde_json::from_value(json!("billing")).unwrap();
        assert_eq!(kind, NotificationKind::System);
    }

    #[test]
    fn test_notification_row_decodes_type_column() {
        let vendor_id = Uuid::new_v4();
        let row: Notification = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "type": "booking",
            "message": "New booking from Dana",
            "is_read": false,
            "vendor_id": vendor_id,
            "staff_id": null,
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.kind, NotificationKind::Booking);
        assert_eq!(row.vendor_id, Some(vendor_id));
        assert!(row.staff_id.is_none());
        assert!(!row.is_read);
    }
}
