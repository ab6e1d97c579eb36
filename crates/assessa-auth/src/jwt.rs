use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Public metadata the identity provider copies into the session token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: u64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

/// Validates session tokens against one configured key.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// RS256 with the identity provider's PEM public key.
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, AuthError> {
        let key = DecodingKey::from_rsa_pem(pem).map_err(|e| AuthError::Key(e.to_string()))?;
        Ok(Self::new(key, Algorithm::RS256))
    }

    /// HS256 with a shared secret, for development setups.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    fn new(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self { key, validation }
    }

    /// Only accept tokens carrying exactly this `iss`. Tokens without one
    /// are rejected too.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        validate_token(token, &self.key, &self.validation)
    }
}

/// Decode and validate a session token.
pub fn validate_token(
    token: &str,
    decoding_key: &DecodingKey,
    validation: &Validation,
) -> Result<SessionClaims, AuthError> {
    let token_data = decode::<SessionClaims>(token, decoding_key, validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        }
    })?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(AuthError::InvalidToken("empty subject".to_string()));
    }

    Ok(token_data.claims)
}
