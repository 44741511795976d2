//! Staff authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::debug;

use crate::{error::AppError, services::AuthService, state::AppState};

/// Staff member extracted from a verified bearer token
#[derive(Debug, Clone, Serialize)]
pub struct StaffUser {
    pub username: String,
}

impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<StaffUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Admit only requests carrying a valid staff token
pub async fn staff_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            debug!(path = %path, "Auth failed: missing or malformed Authorization header");
            AppError::Unauthorized
        })?;

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: token verification failed");
    })?;

    if !claims.is_staff {
        debug!(path = %path, sub = %claims.sub, "Auth failed: not a staff member");
        return Err(AppError::Forbidden("Staff access required".to_string()));
    }

    debug!(path = %path, sub = %claims.sub, "Staff user authenticated");
    request.extensions_mut().insert(StaffUser { username: claims.sub });
    Ok(next.run(request).await)
}
