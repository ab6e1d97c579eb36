use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use assessa_auth::identity::Session;

/// Audit logging middleware.
///
/// Logs every API request as a structured `api_request` event. Runs
/// outside the auth layer, so the caller is only known after the inner
/// service has run.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let user = response
        .extensions()
        .get::<Session>()
        .map(|s| s.user_id.clone())
        .unwrap_or_default();
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        user = %user,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}
