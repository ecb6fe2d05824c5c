//! Vault wire types and domain records.

use secrecy::SecretString;
use serde::Deserialize;

/// One metadata entry from the vault's secret enumeration.
///
/// Identifies a secret without exposing its payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretProperties {
    /// Secret name, unique within the vault's namespace.
    pub name: String,
    /// Version identifier of the current value, when the vault reports one.
    #[serde(default)]
    pub version: Option<String>,
}

/// One page of the paginated metadata enumeration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretListPage {
    /// Entries on this page, in vault order.
    pub items: Vec<SecretProperties>,
    /// Absolute URL of the next page; absent on the last page.
    #[serde(default)]
    pub next_link: Option<String>,
}

/// Wire form of a fetch-by-name response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSecretResponse {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub value: String,
}

/// A fetched secret with its payload.
#[derive(Debug, Clone)]
pub struct SecretBundle {
    /// Secret name.
    pub name: String,
    /// Version identifier of the current value.
    pub version: Option<String>,
    /// Secret payload. Redacted from `Debug` output.
    pub value: SecretString,
}

impl From<GetSecretResponse> for SecretBundle {
    fn from(wire: GetSecretResponse) -> Self {
        Self {
            name: wire.name,
            version: wire.version,
            value: SecretString::from(wire.value),
        }
    }
}
