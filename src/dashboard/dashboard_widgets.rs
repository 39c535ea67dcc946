use std::sync::Arc;

use async_trait::async_trait;

use super::dashboard_models::{FooterLink, WidgetCard, WidgetState, WidgetValue};
use super::dashboard_queries::DashboardQueries;
use crate::auth::IdentityResolver;
use crate::error::Result;

/// Display contract for a summary card: `placeholder()` renders
/// immediately, `load()` resolves the identity, runs the dependent query
/// and returns the settled card. Widgets are independent; one failing
/// card never blocks the others.
#[async_trait]
pub trait SummaryWidget: Send + Sync {
    fn placeholder(&self) -> WidgetCard;
    async fn load(&self) -> WidgetCard;
}

pub struct OpenTasksWidget {
    resolver: Arc<dyn IdentityResolver>,
    queries: Arc<dyn DashboardQueries>,
}

impl OpenTasksWidget {
    pub fn new(resolver: Arc<dyn IdentityResolver>, queries: Arc<dyn DashboardQueries>) -> Self {
        Self { resolver, queries }
    }

    fn card(&self, state: WidgetState) -> WidgetCard {
        WidgetCard {
            title: "Open tasks",
            icon: "clipboard-list",
            accent: "amber",
            state,
            footer: Some(FooterLink {
                label: "View tasks",
                href: "/tasks",
            }),
        }
    }

    async fn value(&self) -> Result<WidgetValue> {
        let Some(identity) = self.resolver.resolve_identity().await? else {
            return Ok(WidgetValue::Count(0));
        };
        let count = self.queries.open_task_count(identity.vendor_id).await?;
        Ok(WidgetValue::Count(count))
    }
}

#[async_trait]
impl SummaryWidget for OpenTasksWidget {
    fn placeholder(&self) -> WidgetCard {
        self.card(WidgetState::Loading)
    }

    async fn load(&self) -> WidgetCard {
        match self.value().await {
            Ok(value) => self.card(WidgetState::Ready { value }),
            Err(err) => {
                tracing::error!("Open tasks widget failed: {}", err);
                self.card(WidgetState::Error {
                    message: err.to_string(),
                })
            }
        }
    }
}

pub struct AvailabilityWidget {
    resolver: Arc<dyn IdentityResolver>,
    queries: Arc<dyn DashboardQueries>,
}

impl AvailabilityWidget {
    pub fn new(resolver: Arc<dyn IdentityResolver>, queries: Arc<dyn DashboardQueries>) -> Self {
        Self { resolver, queries }
    }

    fn card(&self, state: WidgetState) -> WidgetCard {
        WidgetCard {
            title: "Availability",
            icon: "calendar-check",
            accent: "emerald",
            state,
            footer: None,
        }
    }

    async fn value(&self) -> Result<WidgetValue> {
        let Some(identity) = self.resolver.resolve_identity().await? else {
            return Ok(WidgetValue::Count(0));
        };
        let count = self.queries.availability_count(identity.staff_id).await?;
        Ok(WidgetValue::Count(count))
    }
}

#[async_trait]
impl SummaryWidget for AvailabilityWidget {
    fn placeholder(&self) -> WidgetCard {
        self.card(WidgetState::Loading)
    }

    async fn load(&self) -> WidgetCard {
        match self.value().await {
            Ok(value) => self.card(WidgetState::Ready { value }),
            Err(err) => {
                tracing::error!("Availability widget failed: {}", err);
                self.card(WidgetState::Error {
                    message: err.to_string(),
                })
            }
        }
    }
}

pub struct AssignedServicesWidget {
    resolver: Arc<dyn IdentityResolver>,
    queries: Arc<dyn DashboardQueries>,
}

impl AssignedServicesWidget {
    pub fn new(resolver: Arc<dyn IdentityResolver>, queries: Arc<dyn DashboardQueries>) -> Self {
        Self { resolver, queries }
    }

    fn card(&self, state: WidgetState) -> WidgetCard {
        WidgetCard {
            title: "My services",
            icon: "briefcase",
            accent: "sky",
            state,
            footer: Some(FooterLink {
                label: "Manage services",
                href: "/services",
            }),
        }
    }

    async fn value(&self) -> Result<WidgetValue> {
        let Some(identity) = self.resolver.resolve_identity().await? else {
            return Ok(WidgetValue::Items(Vec::new()));
        };
        let services = self.queries.assigned_services(identity.staff_id).await?;
        Ok(WidgetValue::Items(services))
    }
}

#[async_trait]
impl SummaryWidget for AssignedServicesWidget {
    fn placeholder(&self) -> WidgetCard {
        self.card(WidgetState::Loading)
    }

    async fn load(&self) -> WidgetCard {
        match self.value().await {
            Ok(value) => self.card(WidgetState::Ready { value }),
            Err(err) => {
                tracing::error!("Assigned services widget failed: {}", err);
                self.card(WidgetState::Error {
                    message: err.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;
    use crate::staff::{StaffIdentity, StaffRole};
    use parking_lot::Mutex;
    use uuid::Uuid;

    struct FakeResolver {
        identity: Option<StaffIdentity>,
        fail: bool,
    }

    #[async_trait]
    impl IdentityResolver for FakeResolver {
        async fn resolve_identity(&self) -> Result<Option<StaffIdentity>> {
            if self.fail {
                return Err(PortalError::Auth("auth service offline".to_string()));
            }
            Ok(self.identity)
        }
    }

    #[derive(Default)]
    struct FakeQueries {
        tasks: i64,
        slots: i64,
        services: Vec<String>,
        fail: bool,
        seen_vendor: Mutex<Option<Uuid>>,
        seen_staff: Mutex<Option<Uuid>>,
    }

    impl FakeQueries {
        fn remote_error() -> PortalError {
            PortalError::Service {
                status: 500,
                message: "storage offline".to_string(),
            }
        }
    }

    #[async_trait]
    impl DashboardQueries for FakeQueries {
        async fn open_task_count(&self, vendor_id: Uuid) -> Result<i64> {
            *self.seen_vendor.lock() = Some(vendor_id);
            if self.fail {
                return Err(Self::remote_error());
            }
            Ok(self.tasks)
        }

        async fn availability_count(&self, staff_id: Uuid) -> Result<i64> {
            *self.seen_staff.lock() = Some(staff_id);
            if self.fail {
                return Err(Self::remote_error());
            }
            Ok(self.slots)
        }

        async fn assigned_services(&self, staff_id: Uuid) -> Result<Vec<String>> {
            *self.seen_staff.lock() = Some(staff_id);
            if self.fail {
                return Err(Self::remote_error());
            }
            Ok(self.services.clone())
        }
    }

    fn identity() -> StaffIdentity {
        StaffIdentity {
            user_id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            role: StaffRole::Staff,
        }
    }

    fn resolver_with(identity: Option<StaffIdentity>) -> Arc<FakeResolver> {
        Arc::new(FakeResolver {
            identity,
            fail: false,
        })
    }

    #[tokio::test]
    async fn placeholders_render_loading_cards() {
        let resolver = resolver_with(None);
        let queries = Arc::new(FakeQueries::default());

        let tasks = OpenTasksWidget::new(resolver.clone(), queries.clone()).placeholder();
        assert_eq!(tasks.title, "Open tasks");
        assert_eq!(tasks.state, WidgetState::Loading);
        assert_eq!(tasks.footer.unwrap().href, "/tasks");

        let availability =
            AvailabilityWidget::new(resolver.clone(), queries.clone()).placeholder();
        assert_eq!(availability.state, WidgetState::Loading);
        assert!(availability.footer.is_none());

        let services = AssignedServicesWidget::new(resolver, queries).placeholder();
        assert_eq!(services.state, WidgetState::Loading);
        assert_eq!(services.footer.unwrap().href, "/services");
    }

    #[tokio::test]
    async fn open_tasks_counts_vendor_scope() {
        let who = identity();
        let queries = Arc::new(FakeQueries {
            tasks: 4,
            ..FakeQueries::default()
        });
        let widget = OpenTasksWidget::new(resolver_with(Some(who)), queries.clone());

        let card = widget.load().await;

        assert_eq!(
            card.state,
            WidgetState::Ready {
                value: WidgetValue::Count(4)
            }
        );
        assert_eq!(*queries.seen_vendor.lock(), Some(who.vendor_id));
    }

    #[tokio::test]
    async fn availability_counts_staff_scope() {
        let who = identity();
        let queries = Arc::new(FakeQueries {
            slots: 2,
            ..FakeQueries::default()
        });
        let widget = AvailabilityWidget::new(resolver_with(Some(who)), queries.clone());

        let card = widget.load().await;

        assert_eq!(
            card.state,
            WidgetState::Ready {
                value: WidgetValue::Count(2)
            }
        );
        assert_eq!(*queries.seen_staff.lock(), Some(who.staff_id));
    }

    #[tokio::test]
    async fn assigned_services_list_names() {
        let queries = Arc::new(FakeQueries {
            services: vec!["Catering".to_string(), "Decor".to_string()],
            ..FakeQueries::default()
        });
        let widget = AssignedServicesWidget::new(resolver_with(Some(identity())), queries);

        let card = widget.load().await;

        assert_eq!(
            card.state,
            WidgetState::Ready {
                value: WidgetValue::Items(vec!["Catering".to_string(), "Decor".to_string()])
            }
        );
    }

    #[tokio::test]
    async fn unresolved_identity_yields_zero_states() {
        let queries = Arc::new(FakeQueries {
            tasks: 9,
            services: vec!["Catering".to_string()],
            ..FakeQueries::default()
        });
        let resolver = resolver_with(None);

        let tasks = OpenTasksWidget::new(resolver.clone(), queries.clone())
            .load()
            .await;
        assert_eq!(
            tasks.state,
            WidgetState::Ready {
                value: WidgetValue::Count(0)
            }
        );

        let services = AssignedServicesWidget::new(resolver, queries.clone())
            .load()
            .await;
        assert_eq!(
            services.state,
            WidgetState::Ready {
                value: WidgetValue::Items(Vec::new())
            }
        );

        // The dependent queries never ran.
        assert!(queries.seen_vendor.lock().is_none());
        assert!(queries.seen_staff.lock().is_none());
    }

    #[tokio::test]
    async fn error_state_appears_when_query_rejects() {
        let queries = Arc::new(FakeQueries {
            fail: true,
            ..FakeQueries::default()
        });
        let card = OpenTasksWidget::new(resolver_with(Some(identity())), queries)
            .load()
            .await;

        match card.state {
            WidgetState::Error { message } => assert!(message.contains("storage offline")),
            other => panic!("expected error state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn error_state_appears_when_identity_rejects() {
        let resolver = Arc::new(FakeResolver {
            identity: None,
            fail: true,
        });
        let card = AvailabilityWidget::new(resolver, Arc::new(FakeQueries::default()))
            .load()
            .await;

        assert!(matches!(card.state, WidgetState::Error { .. }));
    }
}
