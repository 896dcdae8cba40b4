use std::sync::Arc;

use crate::ai::GenAiClient;
use crate::config::Config;
use crate::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Injected job repository. In-memory for tests and keyless demo runs,
    /// Postgres when `DATABASE_URL` is configured.
    pub store: Arc<dyn JobStore>,
    pub ai: GenAiClient,
    pub config: Config,
}
