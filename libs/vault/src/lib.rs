//! HTTP client for the remote secret vault.
//!
//! Provides a process-wide, task-safe handle for enumerating secret
//! metadata and fetching secret values by name.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod types;

pub use client::VaultClient;
pub use config::VaultConfig;
pub use credential::{Credential, CredentialSource};
pub use error::{VaultError, VaultResult};
pub use types::{SecretBundle, SecretListPage, SecretProperties};
