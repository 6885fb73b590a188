//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::AdminApiClient;
use crate::config::AdminConfig;
use crate::lifecycle::LifecycleController;
use crate::services::session::{FileSessionStore, SessionGate, SystemClock};

/// The session gate as wired in production.
pub type AdminGate = SessionGate<FileSessionStore, SystemClock>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: AdminApiClient,
    gate: AdminGate,
    lifecycle: LifecycleController<AdminApiClient>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let api = AdminApiClient::new(&config.api_base_url);
        let gate = SessionGate::new(
            FileSessionStore::new(config.session_file.clone()),
            SystemClock,
        );
        let lifecycle = LifecycleController::new(api.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                gate,
                lifecycle,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &AdminApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn gate(&self) -> &AdminGate {
        &self.inner.gate
    }

    #[must_use]
    pub fn lifecycle(&self) -> &LifecycleController<AdminApiClient> {
        &self.inner.lifecycle
    }
}
