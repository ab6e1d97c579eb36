use std::time::Duration;

use reqwest::Url;
use serde_json::json;

use crate::error::AuthError;
use crate::identity::SessionRole;

/// Client for the identity provider's user-metadata API.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base: Url,
    secret_key: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, secret_key: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let base = Url::parse(base_url).map_err(|e| AuthError::Config(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(AuthError::Config(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base,
            secret_key: secret_key.into(),
        })
    }

    fn metadata_url(&self, user_id: &str) -> Result<Url, AuthError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| AuthError::Config(self.base.to_string()))?
            .pop_if_empty()
            .extend(["v1", "users", user_id, "metadata"]);
        Ok(url)
    }

    /// Write the session role into the user's public metadata. It shows up
    /// in tokens issued after the write.
    pub async fn set_role(&self, user_id: &str, role: SessionRole) -> Result<(), AuthError> {
        let url = self.metadata_url(user_id)?;
        tracing::info!(user_id, %role, "updating session role");

        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.secret_key)
            .json(&json!({ "public_metadata": { "role": role } }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::IdentityApi {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
