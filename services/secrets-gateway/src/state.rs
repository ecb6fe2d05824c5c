//! Shared request-handler state.

use std::sync::Arc;

use vault_client::VaultClient;

use crate::bootstrap::AppSettings;

/// Process-wide shared state handed to every request handler.
///
/// Both handles are constructed once at startup and shared read-only
/// across all concurrent requests; handlers never mutate them.
#[derive(Clone)]
pub struct AppState {
    /// Shared vault client handle.
    pub vault: Arc<VaultClient>,
    /// Settings produced by the startup bootstrap.
    pub settings: Arc<AppSettings>,
}

impl AppState {
    /// Creates the shared state.
    #[must_use]
    pub fn new(vault: Arc<VaultClient>, settings: Arc<AppSettings>) -> Self {
        Self { vault, settings }
    }
}
