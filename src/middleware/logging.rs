//! Request logging middleware

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tokio::time::Instant;
use tracing::{info, warn};

/// Log one line per request, at `warn` for server errors and for client
/// errors other than plain misses
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);
    let query = query.unwrap_or_default();

    match status {
        s if s.is_server_error() => warn!(
            method = %method,
            path = %path,
            query = %query,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        ),
        s if s.is_client_error() && s != StatusCode::NOT_FOUND => warn!(
            method = %method,
            path = %path,
            query = %query,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request rejected"
        ),
        s if s.is_redirection() => info!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            location = ?response.headers().get(axum::http::header::LOCATION),
            duration_ms = %duration_ms,
            "Request redirected"
        ),
        s => info!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}
