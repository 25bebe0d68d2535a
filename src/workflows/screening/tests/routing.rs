use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::screening::router::{run_handler, ScreeningRunRequest};

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("encode payload")))
        .expect("request builds")
}

#[tokio::test]
async fn run_route_returns_summary() {
    let (service, _dir) = build_service();
    let router = screening_router_with_service(service);
    let csv = export_csv(&[COMPLIANT_ROW, LOW_WAGE_ROW, REVIEW_ROW]);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/screening/run",
            json!({ "csv": csv }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["ruleset"], "current");
    assert_eq!(payload["total"], 3);
    assert_eq!(payload["outcomes"][1]["verdict"], "REJECT");
    assert_eq!(payload["outcomes"][2]["verdict"], "NEEDS_REVIEW");
    assert_eq!(payload["outcomes"][2]["region_used"], "愛知");
}

#[tokio::test]
async fn run_handler_honors_requested_ruleset() {
    let (service, _dir) = build_service();
    let csv = export_csv(&[COMPLIANT_ROW]).replace(",東京,", ",,");

    let response = run_handler(
        State(Arc::new(service)),
        axum::Json(ScreeningRunRequest {
            csv: csv.replace("東京都新宿区西新宿1-1", "新宿区西新宿1-1"),
            ruleset: Some("initial".to_string()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["ruleset"], "initial");
    assert_eq!(payload["outcomes"][0]["verdict"], "NEEDS_REVIEW");
}

#[tokio::test]
async fn run_handler_rejects_unknown_ruleset() {
    let (service, _dir) = build_service();

    let response = run_handler(
        State(Arc::new(service)),
        axum::Json(ScreeningRunRequest {
            csv: export_csv(&[COMPLIANT_ROW]),
            ruleset: Some("v9".to_string()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("v9")));
}

#[tokio::test]
async fn run_route_rejects_empty_export() {
    let (service, _dir) = build_service();
    let router = screening_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/screening/run",
            json!({ "csv": "" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn wages_route_lists_defaults() {
    let (service, _dir) = build_service();
    let router = screening_router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/screening/wages")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["wages"]["東京"], 1226);
    assert_eq!(payload["wages"].as_object().map(|wages| wages.len()), Some(47));
}

#[tokio::test]
async fn wage_edits_are_validated_and_persisted() {
    let (service, _dir) = build_service();
    let router = screening_router_with_service(service);

    let rejected = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/screening/wages",
            json!({ "edits": ["東京=1300", "火星=1000"] }),
        ))
        .await
        .expect("route executes");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let accepted = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/screening/wages",
            json!({ "edits": ["東京=1300"] }),
        ))
        .await
        .expect("route executes");
    assert_eq!(accepted.status(), StatusCode::OK);

    let listed = router
        .oneshot(
            Request::get("/api/v1/screening/wages")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let payload = read_json_body(listed).await;
    assert_eq!(payload["wages"]["東京"], 1300);
}
