use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{PortalError, Result};

/// The signed-in account as the auth service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Who is signed in right now; `None` means no valid session.
    async fn current_user(&self) -> Result<Option<AuthUser>>;
}

pub struct RestAuthGateway {
    http: reqwest::Client,
    auth_url: String,
    service_key: String,
    access_token: String,
}

impl RestAuthGateway {
    pub fn new(auth_url: &str, service_key: &str, access_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: auth_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            access_token: access_token.to_string(),
        }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn current_user(&self) -> Result<Option<AuthUser>> {
        let response = self
            .http
            .get(format!("{}/user", self.auth_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(PortalError::Auth(format!(
                "Auth service returned {}",
                response.status()
            )));
        }

        let user = response.json::<AuthUser>().await?;
        Ok(Some(user))
    }
}
