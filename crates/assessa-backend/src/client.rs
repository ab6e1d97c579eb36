use std::time::Duration;

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use assessa_core::api_paths::{self, Endpoint, Resource};
use assessa_core::models::assignment::{Assignment, AssignmentStatus};
use assessa_instruments::wizard::AssignmentRequest;

use crate::error::BackendError;
use crate::reply;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fields forwarded to `users/update` when a profile is synchronised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSync {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Client for the backend REST API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base })
    }

    /// Absolute URL for an endpoint. Segments are percent-encoded, so
    /// entity names may contain any character.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&Value>,
    ) -> Result<(u16, Vec<u8>), BackendError> {
        let url = self.url(endpoint)?;
        tracing::debug!(%method, path = %endpoint, "backend request");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(path = %endpoint, status, "backend reply");
        Ok((status, bytes))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<Value>,
    ) -> Result<T, BackendError> {
        let (status, bytes) = self.send(method, &endpoint, body.as_ref()).await?;
        reply::decode(&endpoint.to_string(), status, &bytes)
    }

    async fn call_confirm(&self, method: Method, endpoint: Endpoint) -> Result<Value, BackendError> {
        let (status, bytes) = self.send(method, &endpoint, None).await?;
        reply::confirm(&endpoint.to_string(), status, &bytes)
    }

    // ── Generic resource operations ────────────────────────────────

    pub async fn find_all<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, BackendError> {
        self.call(Method::GET, api_paths::find_all(resource), None).await
    }

    /// Fetch one entity by name, using whichever lookup style the resource
    /// supports.
    pub async fn find_one<T: DeserializeOwned>(&self, resource: Resource, name: &str) -> Result<T, BackendError> {
        if resource.keyed_by_body() {
            self.call(Method::POST, api_paths::find_one(resource), Some(json!({ "name": name })))
                .await
        } else {
            self.call(Method::GET, api_paths::find_one_by(resource, name), None)
                .await
        }
    }

    pub async fn create<B, T>(&self, resource: Resource, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.call(Method::POST, api_paths::create(resource), Some(body))
            .await
    }

    /// `PUT R/update/{name}` for resources addressed by name.
    pub async fn update_by_name<B, T>(&self, resource: Resource, name: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.call(Method::PUT, api_paths::update(resource, name), Some(body))
            .await
    }

    /// `POST R/update` with the id merged into the body.
    pub async fn update_with_id<B, T>(&self, resource: Resource, id: i64, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut body = serde_json::to_value(body)?;
        if let Some(object) = body.as_object_mut() {
            object.insert("id".to_string(), json!(id));
        }
        self.call(Method::POST, api_paths::update_in_body(resource), Some(body))
            .await
    }

    pub async fn delete_by_name(&self, resource: Resource, name: &str) -> Result<Value, BackendError> {
        tracing::info!(resource = %resource, entity = name, "deleting");
        self.call_confirm(Method::DELETE, api_paths::delete_by_name(resource, name))
            .await
    }

    pub async fn delete_by_id(&self, resource: Resource, id: i64) -> Result<Value, BackendError> {
        tracing::info!(resource = %resource, id, "deleting");
        self.call_confirm(Method::DELETE, api_paths::delete_by_id(resource, id))
            .await
    }

    // ── Assignments ────────────────────────────────────────────────

    pub async fn find_assignment(&self, id: i64) -> Result<Assignment, BackendError> {
        self.call(
            Method::GET,
            api_paths::find_one_by(Resource::Assignments, &id.to_string()),
            None,
        )
        .await
    }

    pub async fn create_assignment(&self, request: &AssignmentRequest) -> Result<Value, BackendError> {
        tracing::info!(?request, "creating assignment");
        self.create(Resource::Assignments, request).await
    }

    pub async fn update_state(&self, id: i64, state: AssignmentStatus) -> Result<Value, BackendError> {
        tracing::info!(id, %state, "updating assignment state");
        self.call(
            Method::POST,
            api_paths::assignment_state(),
            Some(json!({ "id": id, "state": state })),
        )
        .await
    }

    pub async fn update_score(&self, id: i64, score_set: &[Option<f64>]) -> Result<Value, BackendError> {
        tracing::info!(id, slots = score_set.len(), "submitting score set");
        self.call(
            Method::POST,
            api_paths::assignment_score(),
            Some(json!({ "id": id, "scoreSet": score_set })),
        )
        .await
    }

    /// Assignments the named user takes part in.
    pub async fn test_data(&self, user_name: &str) -> Result<Vec<Assignment>, BackendError> {
        self.call(Method::GET, api_paths::test_data(user_name), None)
            .await
    }

    // ── Users ──────────────────────────────────────────────────────

    pub async fn sync_profile(&self, profile: &ProfileSync) -> Result<Value, BackendError> {
        let body = serde_json::to_value(profile)?;
        self.call(Method::POST, api_paths::update_in_body(Resource::Users), Some(body))
            .await
    }
}
