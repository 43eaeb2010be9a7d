//! Shared fixtures: the router assembled around in-process fakes so no test
//! touches the network.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use uuid::Uuid;

use membox_api::auth::{AuthError, CallerIdentity, SessionVerifier};
use membox_api::setup::routes::build_router;
use membox_api::state::AppState;
use membox_captions::mock::MockCaptioner;
use membox_captions::{Caption, CaptionError, CaptionGenerator};
use membox_core::{Config, StorageBackend, StorageConfig, SupabaseConfig, UploadLimits};
use membox_storage::{ObjectStore, StorageError, StorageResult, StoredObject};

pub const TEST_TOKEN: &str = "valid-session-token";
pub const TEST_CALLER_ID: &str = "4f5cde4a-7e34-4c53-9a85-0f7d9f05f8e1";

pub fn test_caller() -> CallerIdentity {
    CallerIdentity {
        id: Uuid::parse_str(TEST_CALLER_ID).unwrap(),
        email: Some("user@example.com".to_string()),
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        session_cookie: "sb-access-token".to_string(),
        supabase: SupabaseConfig {
            url: "http://localhost:54321".to_string(),
            anon_key: "test-anon-key".to_string(),
        },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            bucket: "images".to_string(),
            cache_seconds: 3600,
            local_path: None,
            local_base_url: None,
        },
        upload: UploadLimits {
            max_file_size_bytes: 10 * 1024 * 1024,
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
        },
        caption_api: None,
    }
}

/// Session verifier accepting a single fixed token.
pub struct StaticSessionVerifier {
    identity: CallerIdentity,
    pub calls: AtomicUsize,
}

impl StaticSessionVerifier {
    pub fn new(identity: CallerIdentity) -> Self {
        Self {
            identity,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SessionVerifier for StaticSessionVerifier {
    async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if token == TEST_TOKEN {
            Ok(self.identity.clone())
        } else {
            Err(AuthError::InvalidSession)
        }
    }
}

/// In-memory store that records how many uploads were attempted.
#[derive(Default)]
pub struct MemoryStore {
    pub uploads: AtomicUsize,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(
        &self,
        key: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(StoredObject {
            path: key.to_string(),
            url: self.public_url(key),
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://storage.test/object/public/images/{}", key)
    }
}

/// Store whose bucket does not exist.
pub struct MissingBucketStore;

#[async_trait]
impl ObjectStore for MissingBucketStore {
    async fn upload(
        &self,
        _key: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        Err(StorageError::BucketNotFound("images".to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://storage.test/object/public/images/{}", key)
    }
}

/// Captioner standing in for a failing external caption API.
pub struct FailingCaptioner;

#[async_trait]
impl CaptionGenerator for FailingCaptioner {
    async fn generate(
        &self,
        _image_url: &str,
        _context: Option<&str>,
    ) -> Result<Vec<Caption>, CaptionError> {
        Err(CaptionError::Upstream(
            "Failed to generate captions from external API".to_string(),
        ))
    }
}

/// Captioner returning a fixed, already-normalized list.
pub struct StaticCaptioner(pub Vec<Caption>);

#[async_trait]
impl CaptionGenerator for StaticCaptioner {
    async fn generate(
        &self,
        _image_url: &str,
        _context: Option<&str>,
    ) -> Result<Vec<Caption>, CaptionError> {
        Ok(self.0.clone())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStore>,
    pub sessions: Arc<StaticSessionVerifier>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_captioner(Arc::new(MockCaptioner))
}

pub fn spawn_app_with_captioner(captioner: Arc<dyn CaptionGenerator>) -> TestApp {
    let storage = Arc::new(MemoryStore::default());
    let sessions = Arc::new(StaticSessionVerifier::new(test_caller()));

    let state = Arc::new(AppState {
        config: test_config(),
        storage: storage.clone(),
        captioner,
        sessions: sessions.clone(),
    });

    TestApp {
        server: TestServer::new(build_router(state)).expect("Failed to start test server"),
        storage,
        sessions,
    }
}

pub fn spawn_app_with_storage(storage: Arc<dyn ObjectStore>) -> TestServer {
    let state = Arc::new(AppState {
        config: test_config(),
        storage,
        captioner: Arc::new(MockCaptioner),
        sessions: Arc::new(StaticSessionVerifier::new(test_caller())),
    });

    TestServer::new(build_router(state)).expect("Failed to start test server")
}
