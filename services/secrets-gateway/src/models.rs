//! HTTP response models.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use vault_client::{SecretBundle, SecretProperties};

/// A named secret record as exposed over the gateway API.
///
/// Listing responses carry `name` and `version` only; `value` is populated
/// solely by fetch-by-name. Unset fields are omitted from the serialized
/// form entirely, never emitted as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Secret name; never empty.
    pub name: String,
    /// Vault-assigned version of the current value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Secret payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<SecretProperties> for Secret {
    fn from(properties: SecretProperties) -> Self {
        Self {
            name: properties.name,
            version: properties.version,
            value: None,
        }
    }
}

impl From<SecretBundle> for Secret {
    fn from(bundle: SecretBundle) -> Self {
        Self {
            name: bundle.name,
            version: bundle.version,
            value: Some(bundle.value.expose_secret().to_owned()),
        }
    }
}
