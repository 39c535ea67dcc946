use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::query::{Filter, SelectQuery};
use crate::error::{PortalError, Result};

/// Typed HTTP client for the hosted data service. Every request carries
/// the project service key and the signed-in user's bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, service_key: &str, access_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(service_key)
            .map_err(|_| PortalError::Auth("Service key is not a valid header value".to_string()))?;
        headers.insert("apikey", apikey);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| PortalError::Auth("Access token is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &SelectQuery) -> Result<Vec<T>> {
        let response = self
            .http
            .get(self.endpoint(query.table()))
            .query(&query.params())
            .send()
            .await?;
        let rows = check_status(response).await?.json::<Vec<T>>().await?;
        Ok(rows)
    }

    /// Counts matching rows without transferring them: a `HEAD` request
    /// with `Prefer: count=exact`, total taken from `Content-Range`.
    pub async fn count(&self, table: &str, filters: &[Filter]) -> Result<i64> {
        let response = self
            .http
            .head(self.endpoint(table))
            .header("Prefer", "count=exact")
            .query(&filter_params(filters))
            .send()
            .await?;
        let response = check_status(response).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.rsplit('/').next())
            .and_then(|total| total.parse::<i64>().ok())
            .ok_or_else(|| {
                PortalError::MalformedResponse(
                    "Missing or invalid Content-Range header".to_string(),
                )
            })
    }

    pub async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: &impl Serialize,
    ) -> Result<()> {
        let response = self
            .http
            .patch(self.endpoint(table))
            .header("Prefer", "return=minimal")
            .query(&filter_params(filters))
            .json(patch)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn insert(&self, table: &str, rows: &impl Serialize) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint(table))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| (filter.column().to_string(), filter.operand().to_string()))
        .collect()
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(PortalError::Service {
        status: status.as_u16(),
        message,
    })
}
