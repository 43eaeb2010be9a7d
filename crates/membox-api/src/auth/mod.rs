//! Session authentication against the external identity service.

pub mod middleware;
pub mod models;
pub mod verifier;

pub use middleware::auth_middleware;
pub use models::CallerIdentity;
pub use verifier::{AuthError, SessionVerifier, SupabaseSessionVerifier};
