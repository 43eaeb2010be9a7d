use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ErrorResponse;

/// Caller identity resolved from the session token and stored in request
/// extensions by the auth middleware.
#[derive(Debug, Clone, Deserialize)]
pub struct CallerIdentity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

// Implement FromRequestParts for CallerIdentity to work with Multipart
// Extension cannot be used with Multipart, so we extract directly from request parts
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Unauthorized. Please log in.".to_string(),
                    }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_deserializes_from_user_payload() {
        let identity: CallerIdentity = serde_json::from_str(
            r#"{"id":"4f5cde4a-7e34-4c53-9a85-0f7d9f05f8e1","email":"user@example.com","role":"authenticated"}"#,
        )
        .unwrap();
        assert_eq!(identity.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_identity_email_is_optional() {
        let identity: CallerIdentity =
            serde_json::from_str(r#"{"id":"4f5cde4a-7e34-4c53-9a85-0f7d9f05f8e1"}"#).unwrap();
        assert!(identity.email.is_none());
    }
}
