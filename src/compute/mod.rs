//! Client for the cloud compute REST API (`/v1` virtual machine endpoints).

pub mod error;
pub mod types;

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ServerConfig;

pub use error::ApiError;
pub use types::{Collection, InstanceAction, ListQuery, DEFAULT_LIMIT};

const API_KEY_HEADER: &str = "x-api-key";
const TENANT_HEADER: &str = "x-tenant-id";

/// Authenticated compute API client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ComputeClient {
    base: Url,
    api_key: String,
    default_tenant: Option<String>,
    http: reqwest::Client,
}

impl ComputeClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.tool_timeout)
            .user_agent(concat!("mcp-vm-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base: config.api_url.clone(),
            api_key: config.api_key.clone(),
            default_tenant: config.tenant_id.clone(),
            http,
        })
    }

    /// `GET /v1/{collection}` with pagination, sort and expansion.
    pub async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
        tenant: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = self
            .send(Method::GET, &[collection.path()], tenant, &query.to_pairs(), None)
            .await?;
        Ok(body.unwrap_or_else(empty_object))
    }

    /// `GET /v1/instances/{id}`.
    pub async fn get_instance(
        &self,
        id: &str,
        expand: &[String],
        tenant: Option<&str>,
    ) -> Result<Value, ApiError> {
        let pairs: Vec<(&str, String)> = expand.iter().map(|e| ("expand", e.clone())).collect();
        let body = self
            .send(Method::GET, &["instances", id], tenant, &pairs, None)
            .await?;
        Ok(body.unwrap_or_else(empty_object))
    }

    /// `POST /v1/instances` with the caller's creation payload.
    pub async fn create_instance(&self, body: &Value, tenant: Option<&str>) -> Result<Value, ApiError> {
        let created = self
            .send(Method::POST, &["instances"], tenant, &[], Some(body))
            .await?;
        Ok(created.unwrap_or_else(|| status_object("created")))
    }

    /// `DELETE /v1/instances/{id}?delete_public_ip=...`.
    pub async fn delete_instance(
        &self,
        id: &str,
        delete_public_ip: bool,
        tenant: Option<&str>,
    ) -> Result<Value, ApiError> {
        let pairs = [("delete_public_ip", delete_public_ip.to_string())];
        let body = self
            .send(Method::DELETE, &["instances", id], tenant, &pairs, None)
            .await?;
        Ok(body.unwrap_or_else(|| status_object("deleted")))
    }

    /// `POST /v1/instances/{id}/{action}`.
    pub async fn instance_action(
        &self,
        id: &str,
        action: InstanceAction,
        tenant: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = self
            .send(Method::POST, &["instances", id, action.path()], tenant, &[], None)
            .await?;
        Ok(body.unwrap_or_else(|| status_object(action.done())))
    }

    /// Build `<base>/v1/<segments>`, percent-encoding each segment.
    ///
    /// Empty and dot segments are refused: the URL builder would drop or
    /// collapse them and the request would hit a different resource.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidSegment((*bad).to_string()));
        }

        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Url(self.base.to_string()))?;
            path.pop_if_empty().push("v1").extend(segments);
        }
        Ok(url)
    }

    /// Issue one request. `Ok(None)` means a 2xx with no body.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        tenant: Option<&str>,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "compute API request");

        let mut req = self
            .http
            .request(method.clone(), url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(ACCEPT, "application/json");

        if let Some(tenant) = tenant.or(self.default_tenant.as_deref()) {
            req = req.header(TENANT_HEADER, tenant);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(ApiError::from_reqwest)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(ApiError::from_reqwest)?;

        if !status.is_success() {
            warn!(%method, status = status.as_u16(), "compute API request failed");
            return Err(ApiError::status(status.as_u16(), &bytes));
        }

        if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn status_object(status: &str) -> Value {
    serde_json::json!({ "status": status })
}
