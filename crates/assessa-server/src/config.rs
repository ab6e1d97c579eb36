use std::net::SocketAddr;
use std::time::Duration;

use eyre::{eyre, WrapErr};

use assessa_backend::client::DEFAULT_TIMEOUT;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// How session tokens are verified.
#[derive(Debug, Clone)]
pub enum JwtKey {
    RsaPem(String),
    Secret(String),
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub api_url: String,
    pub secret_key: String,
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub jwt_key: JwtKey,
    pub jwt_issuer: Option<String>,
    pub identity: Option<IdentityConfig>,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as
    /// missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("ASSESSA_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .wrap_err("ASSESSA_BIND must be a socket address")?;

        let backend_url = get("ASSESSA_BACKEND_URL").ok_or_else(|| eyre!("ASSESSA_BACKEND_URL is required"))?;

        let backend_timeout = match get("ASSESSA_BACKEND_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .wrap_err("ASSESSA_BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        let jwt_key = match (get("ASSESSA_JWT_PUBLIC_KEY"), get("ASSESSA_JWT_SECRET")) {
            (Some(pem), _) => JwtKey::RsaPem(pem),
            (None, Some(secret)) => JwtKey::Secret(secret),
            (None, None) => {
                return Err(eyre!(
                    "one of ASSESSA_JWT_PUBLIC_KEY or ASSESSA_JWT_SECRET is required"
                ));
            }
        };

        let identity = match (get("ASSESSA_IDENTITY_API_URL"), get("ASSESSA_IDENTITY_SECRET_KEY")) {
            (Some(api_url), Some(secret_key)) => Some(IdentityConfig { api_url, secret_key }),
            (None, None) => None,
            _ => {
                return Err(eyre!(
                    "ASSESSA_IDENTITY_API_URL and ASSESSA_IDENTITY_SECRET_KEY must be set together"
                ));
            }
        };

        Ok(Self {
            bind,
            backend_url,
            backend_timeout,
            jwt_key,
            jwt_issuer: get("ASSESSA_JWT_ISSUER"),
            identity,
        })
    }
}
