//! Session token verification against the external session store.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::models::CallerIdentity;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Session verification errors. All of them render as 401 to the caller;
/// the distinction exists for logging.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session is invalid or expired")]
    InvalidSession,

    #[error("Session check failed: {0}")]
    Unavailable(String),
}

/// Resolves an opaque session token to a caller identity via the external
/// identity service.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError>;
}

/// Supabase-style verifier: a `GET /auth/v1/user` call with the session token
/// as bearer auth returns the identity it belongs to, or 401.
pub struct SupabaseSessionVerifier {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseSessionVerifier {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client for session verification")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }
}

#[async_trait]
impl SessionVerifier for SupabaseSessionVerifier {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidSession);
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(format!(
                "session check returned {}",
                status
            )));
        }

        response
            .json::<CallerIdentity>()
            .await
            .map_err(|e| AuthError::Unavailable(format!("invalid user payload: {}", e)))
    }
}
