use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use assessa_auth::error::AuthError;
use assessa_auth::identity::{Session, SessionRole};

use crate::error::ApiError;
use crate::state::AppState;

fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::MissingToken)?;
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// JWT validation middleware.
///
/// Validates the `Authorization: Bearer <token>` header and inserts the
/// caller's [`Session`] into request extensions for handlers to use. The
/// session is copied onto the response for the audit log.
pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = state.verifier.verify(bearer_token(&req)?)?;
    let session = Session::from_claims(&claims)?;

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(session);
    Ok(response)
}

/// Admin gate for `/admin/**`. Must run inside [`require_session`].
pub async fn require_admin(req: Request, next: Next) -> Response {
    let allowed = match req.extensions().get::<Session>() {
        Some(session) => session.require(SessionRole::Admin).map_err(ApiError::from),
        None => Err(ApiError::Unauthorized(AuthError::MissingToken.to_string())),
    };
    match allowed {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}
