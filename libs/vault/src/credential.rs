//! Process-wide vault credential handle.
//!
//! Resolved once at startup and shared read-only across all requests.
//! Resolution tries the environment first, then a token file; failing both
//! is fatal to startup.

use std::env;
use std::fmt;
use std::fs;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{VaultError, VaultResult};

/// Environment variable holding a vault token directly.
pub const TOKEN_ENV: &str = "VAULT_TOKEN";

/// Environment variable naming a file that contains a vault token.
pub const TOKEN_FILE_ENV: &str = "VAULT_TOKEN_FILE";

/// Where a credential's token was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Token taken from the `VAULT_TOKEN` environment variable.
    Environment,
    /// Token read from the file named by `VAULT_TOKEN_FILE`.
    TokenFile,
    /// Token supplied directly by the caller.
    Static,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::TokenFile => f.write_str("token file"),
            Self::Static => f.write_str("static"),
        }
    }
}

/// Immutable vault credential shared across all concurrent requests.
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
    source: CredentialSource,
}

impl Credential {
    /// Resolves a credential: `VAULT_TOKEN` first, then the file named by
    /// `VAULT_TOKEN_FILE`.
    pub fn resolve() -> VaultResult<Self> {
        if let Ok(token) = env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                return Ok(Self {
                    token: SecretString::from(token),
                    source: CredentialSource::Environment,
                });
            }
        }

        if let Ok(path) = env::var(TOKEN_FILE_ENV) {
            let contents = fs::read_to_string(&path)
                .map_err(|e| VaultError::auth_failed(format!("failed to read {path}: {e}")))?;
            let token = contents.trim();
            if token.is_empty() {
                return Err(VaultError::auth_failed(format!("token file {path} is empty")));
            }
            return Ok(Self {
                token: SecretString::from(token.to_owned()),
                source: CredentialSource::TokenFile,
            });
        }

        Err(VaultError::auth_failed(format!(
            "no credential source available, set {TOKEN_ENV} or {TOKEN_FILE_ENV}"
        )))
    }

    /// Builds a credential from a token already in hand.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            source: CredentialSource::Static,
        }
    }

    /// The source this credential was resolved from.
    #[must_use]
    pub const fn source(&self) -> CredentialSource {
        self.source
    }

    /// Exposes the raw token for request authentication.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}
