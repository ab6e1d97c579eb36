use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("requires the {required} role")]
    Forbidden { required: String },

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("identity provider returned HTTP {status}: {body}")]
    IdentityApi { status: u16, body: String },

    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JWT key error: {0}")]
    Key(String),

    #[error("identity provider config error: {0}")]
    Config(String),
}
