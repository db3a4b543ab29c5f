// tests/router_tests.rs

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use family_dna_lab::{config::Config, create_router, state::AppState, store::MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    let config = Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: "router_test_secret".to_string(),
        jwt_expiration: 60,
        rust_log: "error".to_string(),
        port: 0,
        min_assessment_answers: 5,
        family_load_timeout_ms: 1_000,
    };

    create_router(AppState {
        store: Arc::new(MemoryStore::new()),
        config,
    })
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn catalog_lists_every_type() {
    let (status, parents) = get_json("/api/catalog/parent-types").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parents.as_array().unwrap().len(), 6);
    assert_eq!(parents[0]["key"], "autonomy_supporter");

    let (_, children) = get_json("/api/catalog/child-types").await;
    assert_eq!(children.as_array().unwrap().len(), 6);

    let (_, modifiers) = get_json("/api/catalog/modifiers").await;
    let codes: Vec<&str> = modifiers
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["A", "E", "S", "F", "I", "P", "G", "R"]);
}

#[tokio::test]
async fn generic_pairing_preview_still_has_tips() {
    let (status, preview) =
        get_json("/api/catalog/compatibility?parent=growth_facilitator&child=social_connector")
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["level"], "Growing Together");
    assert_eq!(preview["source"], "generic");
    assert!(!preview["tips"].as_array().unwrap().is_empty());
    assert!(preview["key_strategies"].is_null());
}

#[tokio::test]
async fn family_routes_reject_bad_tokens() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/family")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
