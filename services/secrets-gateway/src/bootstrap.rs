//! Remote configuration bootstrap.
//!
//! Populates process-wide settings before the listener binds: the remote
//! key/value store when one is configured, then every secret in the vault.
//! Runs to completion ahead of serving traffic; any failure here is fatal
//! to startup.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures::TryStreamExt;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;
use vault_client::VaultClient;

use crate::config::Config;

/// Immutable process-wide settings produced by the bootstrap.
#[derive(Default)]
pub struct AppSettings {
    values: HashMap<String, String>,
}

impl AppSettings {
    /// Looks up a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of loaded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no entries were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Values may hold secret payloads; Debug shows only the entry count.
impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("entries", &self.values.len())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct KvPage {
    items: Vec<KvItem>,
}

#[derive(Debug, Deserialize)]
struct KvItem {
    key: String,
    value: String,
}

/// Runs the bootstrap to completion.
///
/// Vault entries override key/value store entries on key clash: the vault
/// is the later-loaded source.
pub async fn load(config: &Config, vault: &VaultClient) -> Result<AppSettings> {
    let mut values = HashMap::new();

    if let Some(url) = &config.config_store_url {
        let count = load_config_store(url, config.request_timeout_secs, &mut values)
            .await
            .context("failed to load remote key/value configuration")?;
        info!(count, store = %url, "loaded key/value configuration");
    } else {
        debug!("no config store configured, skipping key/value source");
    }

    let count = load_vault_secrets(vault, &mut values)
        .await
        .context("failed to load vault secrets into configuration")?;
    info!(count, "loaded vault secrets into configuration");

    Ok(AppSettings { values })
}

async fn load_config_store(
    url: &Url,
    timeout_secs: u64,
    values: &mut HashMap<String, String>,
) -> Result<usize> {
    let mut kv_url = url.clone();
    if let Ok(mut segments) = kv_url.path_segments_mut() {
        segments.pop_if_empty().push("kv");
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    let response = http.get(kv_url).send().await?;
    if !response.status().is_success() {
        bail!("config store returned status {}", response.status());
    }

    let page: KvPage = response.json().await?;
    let count = page.items.len();
    for item in page.items {
        values.insert(item.key, item.value);
    }
    Ok(count)
}

async fn load_vault_secrets(
    vault: &VaultClient,
    values: &mut HashMap<String, String>,
) -> Result<usize> {
    let mut names = Box::pin(vault.list_secrets());
    let mut count = 0;
    while let Some(properties) = names.try_next().await? {
        let bundle = vault.get_secret(&properties.name).await?;
        values.insert(bundle.name, bundle.value.expose_secret().to_owned());
        count += 1;
    }
    Ok(count)
}
