use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every request works on its own values.
#[derive(Clone)]
pub struct AppState {
    /// Chat backend. `ChatClient` in production, a stub in handler tests.
    pub chat: Arc<dyn ChatCompletion>,
    pub config: Config,
}
