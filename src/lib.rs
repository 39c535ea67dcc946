//! Client library for the vendor portal: typed access to the hosted
//! data service, realtime notification delivery, dashboard summary
//! widgets, and staff profile management.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod profile;
pub mod realtime;
pub mod staff;
pub mod state;
