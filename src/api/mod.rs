pub mod client;
pub mod query;

pub use client::ApiClient;
pub use query::{Filter, SelectQuery};
