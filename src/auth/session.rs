use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::auth_gateway::{AuthGateway, AuthUser};
use crate::error::Result;
use crate::staff::{StaffDirectory, StaffIdentity};

/// A resolved sign-in: the auth account plus the staff identity it maps
/// to, when one exists.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: AuthUser,
    pub identity: Option<StaffIdentity>,
}

/// Seam the widgets and stores depend on: answers "which staff identity
/// is acting" without the rest of the session machinery.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve_identity(&self) -> Result<Option<StaffIdentity>>;
}

pub struct SessionResolver {
    auth: Arc<dyn AuthGateway>,
    directory: Arc<dyn StaffDirectory>,
}

impl SessionResolver {
    pub fn new(auth: Arc<dyn AuthGateway>, directory: Arc<dyn StaffDirectory>) -> Self {
        Self { auth, directory }
    }

    /// Two-step resolution: ask the auth service who is signed in, then
    /// match that account to its `vendor_staff` row.
    pub async fn resolve_session(&self) -> Result<Option<Session>> {
        let Some(user) = self.auth.current_user().await? else {
            return Ok(None);
        };
        let identity = self
            .directory
            .find_by_user(user.id)
            .await?
            .as_ref()
            .map(StaffIdentity::from);
        Ok(Some(Session { user, identity }))
    }
}

#[async_trait]
impl IdentityResolver for SessionResolver {
    async fn resolve_identity(&self) -> Result<Option<StaffIdentity>> {
        Ok(self
            .resolve_session()
            .await?
            .and_then(|session| session.identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staff::{NewStaffMember, StaffRole, VendorStaff};
    use chrono::Utc;
    use serde_json::Value;
    use uuid::Uuid;

    struct FakeAuth {
        user: Option<AuthUser>,
    }

    #[async_trait]
    impl AuthGateway for FakeAuth {
        async fn current_user(&self) -> Result<Option<AuthUser>> {
            Ok(self.user.clone())
        }
    }

    struct FakeDirectory {
        staff: Option<VendorStaff>,
    }

    #[async_trait]
    impl StaffDirectory for FakeDirectory {
        async fn find_by_user(&self, user_id: Uuid) -> Result<Option<VendorStaff>> {
            Ok(self.staff.clone().filter(|staff| staff.user_id == user_id))
        }

        async fn update_profile(&self, _staff_id: Uuid, _patch: Value) -> Result<()> {
            Ok(())
        }

        async fn enroll(&self, _member: NewStaffMember) -> Result<()> {
            Ok(())
        }
    }

    fn auth_user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "lena@example.com".to_string(),
        }
    }

    fn staff_for(user_id: Uuid) -> VendorStaff {
        VendorStaff {
            id: Uuid::new_v4(),
            user_id,
            vendor_id: Uuid::new_v4(),
            display_name: "Lena Ortiz".to_string(),
            phone: None,
            timezone: "Europe/Berlin".to_string(),
            role: StaffRole::Staff,
            notifications_enabled: true,
            created_at: Utc::now(),
        }
    }

    fn resolver(user: Option<AuthUser>, staff: Option<VendorStaff>) -> SessionResolver {
        SessionResolver::new(
            Arc::new(FakeAuth { user }),
            Arc::new(FakeDirectory { staff }),
        )
    }

    #[tokio::test]
    async fn signed_out_user_has_no_session() {
        let session = resolver(None, None).resolve_session().await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn session_without_staff_row_has_no_identity() {
        let user = auth_user();
        let session = resolver(Some(user.clone()), None)
            .resolve_session()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(session.user.email, user.email);
        assert!(session.identity.is_none());
    }

    #[tokio::test]
    async fn session_matches_staff_row_to_identity() {
        let user = auth_user();
        let staff = staff_for(user.id);
        let resolver = resolver(Some(user), Some(staff.clone()));

        let identity = resolver.resolve_identity().await.unwrap().unwrap();
        assert_eq!(identity.staff_id, staff.id);
        assert_eq!(identity.vendor_id, staff.vendor_id);
        assert_eq!(identity.role, StaffRole::Staff);
    }
}
