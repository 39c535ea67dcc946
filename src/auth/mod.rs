pub mod auth_gateway;
pub mod session;

pub use auth_gateway::{AuthGateway, AuthUser, RestAuthGateway};
pub use session::{IdentityResolver, Session, SessionResolver};
