//! Secrets Gateway
//!
//! A minimal HTTP service proxying reads from the remote secret vault:
//! list secret names, fetch a secret by name, translate the vault's
//! not-found signal into an HTTP 404. Startup loads process-wide
//! configuration from a remote key/value store and the vault before the
//! listener binds.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod shutdown;
pub mod state;
pub mod telemetry;
