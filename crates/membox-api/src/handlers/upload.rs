//! Image upload gateway.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use membox_core::AppError;
use membox_storage::keys::generate_object_key;
use serde::Serialize;

use crate::auth::CallerIdentity;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub path: String,
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// Pull the `file` field out of the multipart form, if present.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, HttpAppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}

/// Upload image handler
///
/// Validates the multipart `file` field (presence, content type, size),
/// uploads the raw bytes to the object storage bucket under a fresh
/// caller-scoped key, and returns the public URL.
///
/// # Errors
/// - 400 - missing file, disallowed content type, or oversize payload
/// - 500 - storage failure (missing bucket reported with a remediation message)
#[tracing::instrument(skip(state, multipart), fields(caller = %identity.id, operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let Some(file) = read_file_field(&mut multipart).await? else {
        return Err(AppError::BadRequest("No file provided".to_string()).into());
    };

    let limits = &state.config.upload;

    let content_type = file.content_type.unwrap_or_default().to_lowercase();
    if !limits.allowed_content_types.contains(&content_type) {
        return Err(AppError::BadRequest(
            "Invalid file type. Allowed: JPEG, PNG, GIF, WebP".to_string(),
        )
        .into());
    }

    if file.data.len() > limits.max_file_size_bytes {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {}MB",
            limits.max_file_size_bytes / 1024 / 1024
        ))
        .into());
    }

    let key = generate_object_key(identity.id, file.file_name.as_deref());
    let stored = state
        .storage
        .upload(&key, &content_type, file.data.to_vec())
        .await?;

    tracing::info!(
        path = %stored.path,
        size_bytes = file.data.len(),
        content_type = %content_type,
        "Image uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        url: stored.url,
        path: stored.path,
    }))
}
