//! Membox Storage Library
//!
//! This crate provides the object-storage collaborator for membox: the
//! `ObjectStore` trait plus implementations for Supabase-style bucket storage
//! and the local filesystem.
//!
//! # Storage key format
//!
//! Objects are keyed per caller: `{caller_id}/{unix_millis}-{random}.{ext}`,
//! where `random` is 13 base36 characters and `ext` falls back to `jpg` when
//! the original filename carries no extension. Key generation is centralized
//! in the `keys` module so all backends stay consistent.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
pub mod local;
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use supabase::SupabaseStorage;
pub use traits::{ObjectStore, StorageError, StorageResult, StoredObject};
