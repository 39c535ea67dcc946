pub mod notification_models;
pub mod notification_repository;
pub mod notification_store;

pub use notification_models::{Notification, NotificationKind};
pub use notification_repository::{NotificationGateway, RestNotificationRepository};
pub use notification_store::NotificationStore;
