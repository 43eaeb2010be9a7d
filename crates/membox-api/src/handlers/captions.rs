//! Caption generation gateway.

use std::sync::Arc;

use axum::{extract::State, Json};
use membox_captions::Caption;
use membox_core::AppError;
use serde::{Deserialize, Serialize};

use crate::auth::CallerIdentity;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionResponse {
    pub success: bool,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub captions: Vec<Caption>,
}

/// Caption generation handler
///
/// Delegates to the generator selected at startup (remote caption API when
/// configured, built-in mock otherwise) and echoes the request back with the
/// normalized captions.
///
/// # Errors
/// - 400 - missing `imageUrl`
/// - 500 - caption API failure
#[tracing::instrument(skip(state, request), fields(caller = %identity.id, operation = "generate_captions"))]
pub async fn generate_captions(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
    ValidatedJson(request): ValidatedJson<CaptionRequest>,
) -> Result<Json<CaptionResponse>, HttpAppError> {
    if request.image_url.is_empty() {
        return Err(AppError::BadRequest("Image URL is required".to_string()).into());
    }

    let captions = state
        .captioner
        .generate(&request.image_url, request.context.as_deref())
        .await?;

    tracing::info!(count = captions.len(), "Captions generated");

    Ok(Json(CaptionResponse {
        success: true,
        image_url: request.image_url,
        context: request.context,
        captions,
    }))
}
