//! Request-handler error mapping.
//!
//! Only the vault's not-found signal is recovered here, as a 404 with an
//! empty body. Every other failure falls through to a plain 500: logged,
//! no detail in the response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use vault_client::VaultError;

/// Errors surfaced by the gateway's request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The named secret does not exist in the vault.
    #[error("secret not found")]
    NotFound,

    /// Any other vault failure, surfaced as an unhandled 500.
    #[error(transparent)]
    Upstream(VaultError),
}

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Upstream(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Upstream(err) => {
                error!(error = %err, "vault request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
