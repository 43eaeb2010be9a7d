//! Application state shared across handlers.
//!
//! Holds the configuration resolved at startup plus the three external
//! collaborators behind trait objects, so tests can swap in fakes.

use std::sync::Arc;

use membox_captions::CaptionGenerator;
use membox_core::Config;
use membox_storage::ObjectStore;

use crate::auth::SessionVerifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ObjectStore>,
    pub captioner: Arc<dyn CaptionGenerator>,
    pub sessions: Arc<dyn SessionVerifier>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
