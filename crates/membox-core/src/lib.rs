//! Membox core library
//!
//! Shared foundations for the membox service: the application configuration
//! (resolved once at process start) and the error taxonomy every request
//! failure funnels into.

pub mod config;
pub mod error;

pub use config::{
    CaptionApiConfig, Config, StorageBackend, StorageConfig, SupabaseConfig, UploadLimits,
};
pub use error::{AppError, LogLevel};
