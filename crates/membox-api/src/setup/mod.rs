//! Application wiring: collaborators, routes, server.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use membox_captions::{mock::MockCaptioner, remote::RemoteCaptioner, CaptionGenerator};
use membox_core::Config;
use membox_storage::create_storage;

use crate::auth::{SessionVerifier, SupabaseSessionVerifier};
use crate::state::AppState;

/// Build the external collaborators from configuration and assemble the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let storage = create_storage(&config)
        .await
        .context("Failed to initialize object storage")?;

    let captioner: Arc<dyn CaptionGenerator> = match &config.caption_api {
        Some(api) => {
            tracing::info!(url = %api.url, timeout_secs = api.timeout_secs, "Using external caption API");
            Arc::new(RemoteCaptioner::new(api).context("Failed to initialize caption API client")?)
        }
        None => {
            tracing::info!("No caption API configured, using built-in mock captions");
            Arc::new(MockCaptioner)
        }
    };

    let sessions: Arc<dyn SessionVerifier> = Arc::new(
        SupabaseSessionVerifier::new(config.supabase.url.clone(), config.supabase.anon_key.clone())
            .context("Failed to initialize session verifier")?,
    );

    let state = Arc::new(AppState {
        config,
        storage,
        captioner,
        sessions,
    });
    let router = routes::build_router(state.clone());

    Ok((state, router))
}
