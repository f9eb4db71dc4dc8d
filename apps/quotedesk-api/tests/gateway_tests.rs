//! Integration tests: the production router in front of an in-process
//! mock ServiceNow instance.
//!
//! The mock counts every request it sees, so the tests can prove that
//! locally-rejected calls (missing token, illegal transition) never
//! reach upstream.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use quotedesk_api::config::GatewayConfig;
use quotedesk_api::state::AppState;
use serde_json::{json, Value};
use tower::util::ServiceExt;

#[derive(Clone, Default)]
struct MockSn {
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
    last_patch: Arc<Mutex<Option<Value>>>,
}

fn quote_row(sys_id: &str, number: &str, state: &str) -> Value {
    json!({
        "sys_id": sys_id,
        "number": number,
        "state": state,
        "currency": "USD",
        "account": "Acme Corp",
        "total_amount": "$4,500.00",
    })
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": {"message": "User Not Authorized", "detail": null},
            "status": "failure"
        })),
    )
}

fn is_bad_token(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer bad-token")
}

async fn table_list(
    State(sn): State<MockSn>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    sn.hits.fetch_add(1, Ordering::SeqCst);
    *sn.last_query.lock().unwrap() = Some(params);
    if is_bad_token(&headers) {
        return unauthorized().into_response();
    }

    let rows = match table.as_str() {
        "sn_quote_mgmt_core_quote" => vec![
            quote_row("a", "QUO0001001", "draft"),
            quote_row("b", "QUO0001002", "pending"),
        ],
        "sn_quote_mgmt_core_quote_line" => vec![
            json!({"sys_id": "l1", "product_offering": "Fiber 500", "quantity": "2",
                   "unit_price": "$99.00", "term_month": "12", "state": "active"}),
            json!({"sys_id": "l2", "product_offering": "Fiber 1000", "quantity": "1",
                   "unit_price": "$149.00", "term_month": "24", "state": "active"}),
        ],
        "ast_contract" => vec![json!({"sys_id": "c1", "name": "CNTR0001"})],
        "sn_prd_pm_product_offering" => vec![
            json!({"sys_id": "po1", "name": "Fiber 500", "status": "published"}),
        ],
        _ => vec![],
    };

    let total_count = HeaderName::from_static("x-total-count");
    ([(total_count, "42")], Json(json!({ "result": rows }))).into_response()
}

async fn table_record(
    State(sn): State<MockSn>,
    Path((table, sys_id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    sn.hits.fetch_add(1, Ordering::SeqCst);
    if table == "sn_quote_mgmt_core_quote" && sys_id == "a" {
        (
            StatusCode::OK,
            Json(json!({ "result": quote_row("a", "QUO0001001", "draft") })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": {"message": "No Record found", "detail": "Record doesn't exist"},
                "status": "failure"
            })),
        )
    }
}

async fn table_patch(
    State(sn): State<MockSn>,
    Path((_table, sys_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    sn.hits.fetch_add(1, Ordering::SeqCst);
    *sn.last_patch.lock().unwrap() = Some(body.clone());
    let state = body["state"].as_str().unwrap_or("draft");
    Json(json!({ "result": quote_row(&sys_id, "QUO0001001", state) }))
}

async fn generate(State(sn): State<MockSn>, Path(quote_id): Path<String>) -> Json<Value> {
    sn.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "result": {"sys_id": "c9", "name": "CNTR0009", "quote": quote_id, "state": "draft"}
    }))
}

async fn attachment(
    State(sn): State<MockSn>,
) -> ([(HeaderName, &'static str); 2], &'static [u8]) {
    sn.hits.fetch_add(1, Ordering::SeqCst);
    (
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"CNTR0001.pdf\"",
            ),
        ],
        b"%PDF-1.7 contract",
    )
}

/// Bind the mock instance on an ephemeral port and build the gateway
/// in front of it.
async fn gateway() -> (Router, MockSn) {
    let sn = MockSn::default();
    let upstream = Router::new()
        .route(
            "/api/now/table/:table",
            get(table_list),
        )
        .route(
            "/api/now/table/:table/:sys_id",
            get(table_record).patch(table_patch),
        )
        .route("/api/x_qdesk/contract/generate/:quote_id", post(generate))
        .route("/api/now/attachment/:sys_id/file", get(attachment))
        .with_state(sn.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });

    let state = AppState::with_config(GatewayConfig::for_tests(format!("http://{addr}")));
    (quotedesk_api::app(Arc::new(state)), sn)
}

fn authed(req: axum::http::request::Builder) -> axum::http::request::Builder {
    req.header(header::AUTHORIZATION, "Bearer sn-access-token")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_token_is_rejected_before_any_upstream_call() {
    let (app, sn) = gateway().await;

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/quote")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("authentication required"));
    assert_eq!(sn.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_status_and_message_are_forwarded() {
    let (app, _sn) = gateway().await;

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/quote")
                .header(header::AUTHORIZATION, "Bearer bad-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["message"], json!("User Not Authorized"));
}

#[tokio::test]
async fn upstream_404_keeps_its_structured_message() {
    let (app, _sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/quote/nope"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["message"], json!("No Record found"));
}

#[tokio::test]
async fn quote_list_shapes_the_table_query_and_computes_pages() {
    let (app, sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/quote?page=2&limit=10&q=QUO"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["page"], json!(2));
    assert_eq!(body["total"], json!(42));
    assert_eq!(body["total_pages"], json!(5));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let params = sn.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(params.get("sysparm_display_value").map(String::as_str), Some("true"));
    assert_eq!(params.get("sysparm_limit").map(String::as_str), Some("10"));
    assert_eq!(params.get("sysparm_offset").map(String::as_str), Some("10"));
    assert_eq!(params.get("sysparm_query").map(String::as_str), Some("numberLIKEQUO"));
}

#[tokio::test]
async fn get_quote_joins_lines_and_contract_refs() {
    let (app, _sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/quote/a"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["quote_lines"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["contracts"][0]["sys_id"], json!("c1"));
}

#[tokio::test]
async fn unknown_state_string_is_a_local_400() {
    let (app, sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/quote-state/a").method("PATCH"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"state": "published"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["message"], json!("unknown quote state: \"published\""));
    assert_eq!(sn.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn illegal_transition_is_a_local_400() {
    let (app, sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/quote-state/a").method("PATCH"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"state": "approved", "from": "rejected"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("illegal quote state transition: rejected -> approved")
    );
    assert_eq!(sn.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn legal_transition_forwards_and_echoes_the_canonical_record() {
    let (app, sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/quote-state/a").method("PATCH"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"state": "approved", "from": "draft"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["state"], json!("approved"));

    let patched = sn.last_patch.lock().unwrap().clone().unwrap();
    assert_eq!(patched, json!({"state": "approved"}));
}

#[tokio::test]
async fn by_spec_lookup_filters_and_caps_at_fifty() {
    let (app, sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/product-offerings/by-spec/spec1"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], json!(true));

    let params = sn.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(params.get("sysparm_limit").map(String::as_str), Some("50"));
    assert_eq!(
        params.get("sysparm_query").map(String::as_str),
        Some("product_specification=spec1")
    );
}

#[tokio::test]
async fn contract_generation_wraps_the_new_contract() {
    let (app, _sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/contract/a").method("POST"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["sys_id"], json!("c9"));
    assert_eq!(body["data"]["quote"], json!("a"));
}

#[tokio::test]
async fn download_passes_bytes_and_disposition_through() {
    let (app, _sn) = gateway().await;

    let resp = app
        .oneshot(
            authed(Request::builder().uri("/api/download-contract/c1"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"CNTR0001.pdf\""
    );
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"%PDF-1.7 contract");
}
