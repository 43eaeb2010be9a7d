//! Caption generation collaborators.
//!
//! Two implementations of the `CaptionGenerator` trait: `remote::RemoteCaptioner`
//! forwards to a configured external captioning API; `mock::MockCaptioner`
//! synthesizes a fixed list when no API is configured. Which one the service
//! uses is decided once at startup from configuration.

pub mod mock;
pub mod remote;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Captions requested per image.
pub const NUM_CAPTIONS: usize = 10;

/// One generated caption. Ids are 1-based and sequential within a single
/// response; they are not persisted or globally unique.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Caption {
    pub id: u32,
    pub text: String,
}

/// Caption generation errors
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("{0}")]
    Upstream(String),

    #[error("Invalid caption API response: {0}")]
    InvalidResponse(String),
}

/// Caption generation abstraction
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Generate captions for the image at `image_url`, optionally steered by
    /// a free-form context string.
    async fn generate(
        &self,
        image_url: &str,
        context: Option<&str>,
    ) -> Result<Vec<Caption>, CaptionError>;
}
