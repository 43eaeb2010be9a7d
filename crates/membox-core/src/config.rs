//! Configuration module
//!
//! All environment state is read exactly once at process start and resolved
//! into an explicit `Config` object that is passed into each handler via the
//! application state. Handlers never read the environment ad hoc; in
//! particular, the caption-API feature toggle (mock vs remote generator) is
//! decided here.

use std::env;

const MAX_FILE_SIZE_MB: usize = 10;
const CAPTION_API_TIMEOUT_SECS: u64 = 30;
const STORAGE_CACHE_SECONDS: u32 = 3600;
const DEFAULT_BUCKET: &str = "images";
const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";

/// Object storage backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// Supabase-style bucket API over HTTP (default).
    Supabase,
    /// Local filesystem, for development and tests.
    Local,
}

/// Connection details for the external Supabase project, used for both the
/// session-check call and the bucket storage backend.
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Object storage configuration.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub cache_seconds: u32,
    pub local_path: Option<String>,
    pub local_base_url: Option<String>,
}

/// Upload validation limits.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

/// External caption API configuration. Present only when both the URL and the
/// key were configured; absence selects the built-in mock generator.
#[derive(Clone, Debug)]
pub struct CaptionApiConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl CaptionApiConfig {
    /// Both the URL and the key must be present and non-empty; a partial
    /// configuration falls back to the mock generator.
    pub fn from_parts(url: Option<String>, api_key: Option<String>, timeout_secs: u64) -> Option<Self> {
        match (url, api_key) {
            (Some(url), Some(api_key)) if !url.is_empty() && !api_key.is_empty() => Some(Self {
                url,
                api_key,
                timeout_secs,
            }),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub session_cookie: String,
    pub supabase: SupabaseConfig,
    pub storage: StorageConfig,
    pub upload: UploadLimits,
    pub caption_api: Option<CaptionApiConfig>,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let supabase = SupabaseConfig {
            url: env::var("SUPABASE_URL")
                .map_err(|_| anyhow::anyhow!("SUPABASE_URL must be set"))?,
            anon_key: env::var("SUPABASE_ANON_KEY")
                .map_err(|_| anyhow::anyhow!("SUPABASE_ANON_KEY must be set"))?,
        };

        let backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "supabase".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackend::Local,
            _ => StorageBackend::Supabase,
        };

        let storage = StorageConfig {
            backend,
            bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            cache_seconds: env::var("STORAGE_CACHE_SECONDS")
                .unwrap_or_else(|_| STORAGE_CACHE_SECONDS.to_string())
                .parse()
                .unwrap_or(STORAGE_CACHE_SECONDS),
            local_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        };

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png,image/gif,image/webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let caption_api = CaptionApiConfig::from_parts(
            env::var("CAPTION_API_URL").ok(),
            env::var("CAPTION_API_KEY").ok(),
            env::var("CAPTION_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CAPTION_API_TIMEOUT_SECS),
        );

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            session_cookie: env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string()),
            supabase,
            storage,
            upload: UploadLimits {
                max_file_size_bytes: max_file_size_mb * 1024 * 1024,
                allowed_content_types,
            },
            caption_api,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.supabase.url.starts_with("http://") && !self.supabase.url.starts_with("https://") {
            return Err(anyhow::anyhow!("SUPABASE_URL must be an http(s) URL"));
        }

        if self.upload.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        if self.upload.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_CONTENT_TYPES must not be empty"));
        }

        if self.storage.backend == StorageBackend::Local
            && (self.storage.local_path.is_none() || self.storage.local_base_url.is_none())
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}
