//! Vault client configuration.

use std::time::Duration;
use url::Url;

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault endpoint base URL
    pub addr: Url,
    /// Request timeout
    pub timeout: Duration,
    /// Page size for metadata enumeration
    pub page_size: usize,
}

impl VaultConfig {
    /// Create a new configuration for the given vault endpoint.
    #[must_use]
    pub fn new(addr: Url) -> Self {
        Self {
            addr,
            timeout: Duration::from_secs(30),
            page_size: 25,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set enumeration page size (clamped to at least 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
