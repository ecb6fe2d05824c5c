//! HTTP surface: the secret gateway endpoint.

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use tower_http::trace::TraceLayer;
use vault_client::VaultError;

use crate::error::AppError;
use crate::models::Secret;
use crate::state::AppState;

/// Builds the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/secrets", get(list_secrets))
        .route("/secrets/{name}", get(get_secret))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// Streams the vault's metadata enumeration as a JSON array.
///
/// Items are encoded as they arrive from the vault, in vault order, without
/// materializing the full list. Client disconnect drops the body stream and
/// with it the enumeration, so no further vault calls are made. An
/// enumeration error aborts the response mid-stream; it is deliberately not
/// handled here.
async fn list_secrets(State(state): State<AppState>) -> Response {
    json_array_response(state.vault.list_secrets().map_ok(Secret::from))
}

/// Fetches one secret by name.
///
/// The name's shape is not validated; the vault decides whether it exists.
/// Not-found maps to a 404 with an empty body via [`AppError`]; every other
/// failure propagates as a 500.
async fn get_secret(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bundle = state.vault.get_secret(&name).await?;
    Ok((StatusCode::OK, Json(Secret::from(bundle))))
}

/// Incrementally encodes `secrets` as a JSON array response body.
fn json_array_response<S>(secrets: S) -> Response
where
    S: Stream<Item = Result<Secret, VaultError>> + Send + 'static,
{
    let opening = stream::once(async { Ok(Bytes::from_static(b"[")) });
    let closing = stream::once(async { Ok(Bytes::from_static(b"]")) });
    let items = secrets.enumerate().map(|(index, item)| {
        let secret = item.map_err(std::io::Error::other)?;
        let mut chunk = Vec::new();
        if index > 0 {
            chunk.push(b',');
        }
        serde_json::to_writer(&mut chunk, &secret).map_err(std::io::Error::other)?;
        Ok::<Bytes, std::io::Error>(Bytes::from(chunk))
    });

    let body = Body::from_stream(opening.chain(items).chain(closing));
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
