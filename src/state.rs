use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::{RestAuthGateway, Session, SessionResolver};
use crate::dashboard::{
    AssignedServicesWidget, AvailabilityWidget, OpenTasksWidget, RestDashboardQueries,
    SummaryWidget,
};
use crate::error::Result;
use crate::notification::{NotificationStore, RestNotificationRepository};
use crate::profile::ProfileService;
use crate::realtime::{ChangeFeed, RealtimeClient};
use crate::staff::{RestStaffDirectory, StaffDirectory};

#[derive(Clone)]
pub struct Config {
    pub service_url: String,
    pub service_key: String,
    pub access_token: String,
    pub auth_url: String,
    pub realtime_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            service_url: std::env::var("PORTAL_SERVICE_URL")
                .expect("PORTAL_SERVICE_URL must be set"),
            service_key: std::env::var("PORTAL_SERVICE_KEY")
                .expect("PORTAL_SERVICE_KEY must be set"),
            access_token: std::env::var("PORTAL_ACCESS_TOKEN")
                .expect("PORTAL_ACCESS_TOKEN must be set"),
            auth_url: std::env::var("PORTAL_AUTH_URL").expect("PORTAL_AUTH_URL must be set"),
            realtime_url: std::env::var("PORTAL_REALTIME_URL")
                .expect("PORTAL_REALTIME_URL must be set"),
        }
    }
}

/// Everything the portal needs, wired once at startup: REST and realtime
/// clients, the gateways over them, and the services handed to the UI.
pub struct Portal {
    pub config: Arc<Config>,
    resolver: Arc<SessionResolver>,
    directory: Arc<dyn StaffDirectory>,
    notifications: Arc<RestNotificationRepository>,
    feed: Arc<dyn ChangeFeed>,
    queries: Arc<RestDashboardQueries>,
    profile: ProfileService,
}

impl Portal {
    pub async fn connect(config: Arc<Config>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(
            &config.service_url,
            &config.service_key,
            &config.access_token,
        )?);

        let auth = Arc::new(RestAuthGateway::new(
            &config.auth_url,
            &config.service_key,
            &config.access_token,
        ));
        let directory = Arc::new(RestStaffDirectory::new(api.clone()));
        let resolver = Arc::new(SessionResolver::new(auth, directory.clone()));

        let feed: Arc<dyn ChangeFeed> =
            Arc::new(RealtimeClient::connect(&config.realtime_url).await?);

        Ok(Portal {
            config,
            resolver,
            directory: directory.clone(),
            notifications: Arc::new(RestNotificationRepository::new(api.clone())),
            feed,
            queries: Arc::new(RestDashboardQueries::new(api)),
            profile: ProfileService::new(directory),
        })
    }

    pub async fn resolve_session(&self) -> Result<Option<Session>> {
        self.resolver.resolve_session().await
    }

    /// A fresh store bound to the shared gateways; callers own its
    /// lifecycle (`set_recipient`, `close`).
    pub fn notification_store(&self) -> NotificationStore {
        NotificationStore::new(self.notifications.clone(), self.feed.clone())
    }

    pub fn widgets(&self) -> Vec<Box<dyn SummaryWidget>> {
        vec![
            Box::new(OpenTasksWidget::new(
                self.resolver.clone(),
                self.queries.clone(),
            )),
            Box::new(AvailabilityWidget::new(
                self.resolver.clone(),
                self.queries.clone(),
            )),
            Box::new(AssignedServicesWidget::new(
                self.resolver.clone(),
                self.queries.clone(),
            )),
        ]
    }

    pub fn profile(&self) -> &ProfileService {
        &self.profile
    }

    /// Staff lookups and onboarding inserts against `vendor_staff`.
    pub fn directory(&self) -> &dyn StaffDirectory {
        self.directory.as_ref()
    }
}
