//! Session-auth middleware shared by both gateway endpoints.
//!
//! Authentication runs before any payload validation and short-circuits the
//! request on failure; no collaborator is called for an unauthenticated
//! request.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use membox_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Extract the session token from the Authorization header, falling back to
/// the session cookie.
pub(crate) fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == cookie_name && !value.is_empty()).then(|| value.to_string())
            })
        })
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_session_token(request.headers(), &state.config.session_cookie) {
        Some(token) => token,
        None => {
            tracing::debug!("Request without session token");
            return unauthorized();
        }
    };

    match state.sessions.verify(&token).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Session verification failed");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    HttpAppError(AppError::Unauthorized(
        "Unauthorized. Please log in.".to_string(),
    ))
    .into_response()
}
