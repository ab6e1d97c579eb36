use std::collections::HashMap;
use std::sync::Arc;

use jiff::Timestamp;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use assessa_auth::client::IdentityClient;
use assessa_auth::jwt::TokenVerifier;
use assessa_backend::client::{BackendClient, BackendConfig};
use assessa_instruments::wizard::AssignmentWizard;

use crate::config::{JwtKey, ServerConfig};

/// An assignment wizard in progress, owned by the admin who started it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    pub id: Uuid,
    #[serde(skip)]
    pub owner: String,
    pub wizard: AssignmentWizard,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WizardDraft {
    pub fn new(owner: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            wizard: AssignmentWizard::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

pub type Drafts = Arc<Mutex<HashMap<Uuid, WizardDraft>>>;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub identity: Option<IdentityClient>,
    pub verifier: Arc<TokenVerifier>,
    pub drafts: Drafts,
}

impl AppState {
    pub fn new(backend: BackendClient, identity: Option<IdentityClient>, verifier: TokenVerifier) -> Self {
        Self {
            backend,
            identity,
            verifier: Arc::new(verifier),
            drafts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &ServerConfig) -> eyre::Result<Self> {
        let backend = BackendClient::new(&BackendConfig {
            base_url: config.backend_url.clone(),
            timeout: config.backend_timeout,
        })?;

        let verifier = match &config.jwt_key {
            JwtKey::RsaPem(pem) => TokenVerifier::from_rsa_pem(pem.as_bytes())?,
            JwtKey::Secret(secret) => TokenVerifier::from_secret(secret.as_bytes()),
        };
        let verifier = match &config.jwt_issuer {
            Some(issuer) => verifier.with_issuer(issuer),
            None => verifier,
        };

        let identity = config
            .identity
            .as_ref()
            .map(|c| IdentityClient::new(&c.api_url, c.secret_key.clone(), config.backend_timeout))
            .transpose()?;

        Ok(Self::new(backend, identity, verifier))
    }

    pub fn identity(&self) -> Result<&IdentityClient, crate::error::ApiError> {
        self.identity
            .as_ref()
            .ok_or_else(|| crate::error::ApiError::Unavailable("identity provider is not configured".to_string()))
    }
}
