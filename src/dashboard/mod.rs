pub mod dashboard_models;
pub mod dashboard_queries;
pub mod dashboard_widgets;

pub use dashboard_models::{FooterLink, WidgetCard, WidgetState, WidgetValue};
pub use dashboard_queries::{DashboardQueries, RestDashboardQueries};
pub use dashboard_widgets::{
    AssignedServicesWidget, AvailabilityWidget, OpenTasksWidget, SummaryWidget,
};
