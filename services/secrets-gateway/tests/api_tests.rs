//! End-to-end tests for the gateway HTTP surface against a mock vault.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use secrets_gateway::bootstrap::AppSettings;
use secrets_gateway::http;
use secrets_gateway::state::AppState;
use vault_client::{Credential, VaultClient, VaultConfig};

fn gateway_for(server: &MockServer, page_size: usize) -> Router {
    let addr = Url::parse(&server.uri()).unwrap();
    let vault = Arc::new(
        VaultClient::new(
            VaultConfig::new(addr).with_page_size(page_size),
            Credential::from_token("test-token"),
        )
        .unwrap(),
    );
    http::router(AppState::new(vault, Arc::new(AppSettings::default())))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn list_returns_metadata_without_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "name": "db-pass", "version": "v1" }]
        })))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 25), "/secrets").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!([{ "name": "db-pass", "version": "v1" }]));
    assert!(!String::from_utf8(body).unwrap().contains("value"));
}

#[tokio::test]
async fn list_empty_vault_returns_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 25), "/secrets").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn list_sets_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let response = gateway_for(&server, 25)
        .oneshot(Request::builder().uri("/secrets").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn list_preserves_vault_order_across_pages() {
    let server = MockServer::start().await;
    let second_page = format!("{}/secrets?page=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/secrets"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "name": "alpha", "version": "v1" },
                { "name": "beta", "version": "v2" }
            ],
            "nextLink": second_page
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/secrets"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "name": "gamma" }]
        })))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 2), "/secrets").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        parsed,
        json!([
            { "name": "alpha", "version": "v1" },
            { "name": "beta", "version": "v2" },
            { "name": "gamma" }
        ])
    );
}

#[tokio::test]
async fn list_enumeration_error_aborts_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = gateway_for(&server, 25)
        .oneshot(Request::builder().uri("/secrets").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Headers are already committed when the enumeration fails; the body
    // stream errors instead of completing.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.into_body().collect().await.is_err());
}

#[tokio::test]
async fn get_existing_secret_returns_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets/db-pass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "db-pass",
            "version": "v1",
            "value": "p@ss"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 25), "/secrets/db-pass").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        parsed,
        json!({ "name": "db-pass", "version": "v1", "value": "p@ss" })
    );
}

#[tokio::test]
async fn get_missing_secret_returns_404_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 25), "/secrets/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_upstream_failure_returns_500_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 25), "/secrets/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[tokio::test]
async fn get_omits_unset_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets/unversioned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "unversioned",
            "value": "v"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(gateway_for(&server, 25), "/secrets/unversioned").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    let object = parsed.as_object().unwrap();
    assert!(!object.contains_key("version"));
    assert_eq!(object.get("value"), Some(&json!("v")));
}

#[tokio::test]
async fn repeated_gets_are_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secrets/db-pass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "db-pass",
            "version": "v1",
            "value": "p@ss"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let router = gateway_for(&server, 25);
    let (first_status, first_body) = get(router.clone(), "/secrets/db-pass").await;
    let (second_status, second_body) = get(router, "/secrets/db-pass").await;

    assert_eq!(first_status, second_status);
    assert_eq!(first_body, second_body);
}

#[tokio::test]
async fn healthz_reports_ok() {
    let server = MockServer::start().await;
    let (status, body) = get(gateway_for(&server, 25), "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!({ "status": "ok" }));
}
