pub mod profile_models;
pub mod profile_service;

pub use profile_models::{ProfileSettings, UpdateProfileRequest};
pub use profile_service::ProfileService;
