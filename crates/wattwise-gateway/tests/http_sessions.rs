//! Session handlers driven directly (no socket).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::{Duration, Instant};

use axum::body::{to_bytes, Bytes};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde_json::Value;

use wattwise_gateway::app_state::AppState;
use wattwise_gateway::config::{self, GatewayConfig};
use wattwise_gateway::{ops, session, transport::http};

fn app() -> AppState {
    AppState::new(GatewayConfig::default())
}

fn app_with(yaml: &str) -> AppState {
    AppState::new(config::load_from_str(yaml).unwrap())
}

fn sid(s: &str) -> Path<String> {
    Path(s.to_string())
}

async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

async fn submit(app: &AppState, s: &str, body: &str) -> Response {
    http::submit_record(State(app.clone()), sid(s), Bytes::from(body.to_string())).await
}

#[tokio::test]
async fn report_before_any_record_is_empty_dataset() {
    let app = app();
    let resp = http::report(State(app.clone()), sid("alice")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let v = body_json(resp).await;
    assert_eq!(v["error"], "EMPTY_DATASET");
    // First access created the session.
    assert_eq!(app.sessions().len(), 1);
}

#[tokio::test]
async fn submit_then_report() {
    let app = app();
    let r = submit(&app, "alice", r#"{"month":"Mar","bill":2600,"rate":7.0,"units":350}"#).await;
    assert_eq!(r.status(), StatusCode::CREATED);
    let r = submit(&app, "alice", r#"{"month":"Jan","bill":2000,"rate":6.0,"units":300}"#).await;
    assert_eq!(body_json(r).await["count"], 2);

    let resp = http::report(State(app.clone()), sid("alice")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v = body_json(resp).await;

    assert_eq!(v["table"][0]["month"], "Jan");
    assert_eq!(v["table"][1]["month"], "Mar");
    assert_eq!(v["summary"]["total_units"], 650.0);
    assert_eq!(v["summary"]["total_bill"], 4600.0);
    assert_eq!(v["trend"], "UP");
    assert_eq!(v["safety"]["level"], "high");
    assert_eq!(v["safety"]["alert"], true);
    assert_eq!(v["projection"].as_array().unwrap().len(), 3);
    assert_eq!(v["projection"][2]["label"], "Next");
}

#[tokio::test]
async fn sessions_do_not_see_each_other() {
    let app = app();
    submit(&app, "alice", r#"{"month":"Jan","bill":1,"rate":1,"units":1}"#).await;

    let resp = http::report(State(app.clone()), sid("bob")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = http::report(State(app.clone()), sid("alice")).await;
    assert_eq!(body_json(resp).await["summary"]["record_count"], 1);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = app();
    let r = submit(&app, "alice", r#"{"month":"Jan","bill":-5,"rate":1,"units":1}"#).await;
    assert_eq!(r.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(r).await["error"], "INVALID_RECORD");

    let r = submit(&app, "alice", r#"{"month":"January","bill":5,"rate":1,"units":1}"#).await;
    assert_eq!(body_json(r).await["error"], "BAD_REQUEST");

    let r = submit(&app, "alice", "not json").await;
    assert_eq!(r.status(), StatusCode::BAD_REQUEST);

    let r = http::submit_record(
        State(app.clone()),
        sid("alice"),
        Bytes::from_static(&[b'{', 0xff, 0xfe, b'}']),
    )
    .await;
    assert_eq!(r.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(r).await["error"], "BAD_REQUEST");

    let r = submit(&app, "bad id!", r#"{"month":"Jan","bill":5,"rate":1,"units":1}"#).await;
    assert_eq!(r.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.metrics().records_rejected.get(&[]), 1);
    assert_eq!(app.metrics().records_appended.get(&[]), 0);
}

#[tokio::test]
async fn clear_twice_then_report_is_empty() {
    let app = app();
    submit(&app, "alice", r#"{"month":"Jan","bill":1,"rate":1,"units":1}"#).await;

    for _ in 0..2 {
        let r = http::clear_records(State(app.clone()), sid("alice")).await;
        assert_eq!(r.status(), StatusCode::NO_CONTENT);
    }
    let r = http::report(State(app.clone()), sid("alice")).await;
    assert_eq!(r.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.metrics().empty_dataset.get(&[]), 1);
}

#[tokio::test]
async fn export_csv_uses_sorted_table() {
    let app = app();
    submit(&app, "s1", r#"{"month":"Mar","bill":2600,"rate":7,"units":350}"#).await;
    submit(&app, "s1", r#"{"month":"Jan","bill":2000,"rate":6,"units":300}"#).await;

    let resp = http::export_csv(State(app.clone()), sid("s1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let text = body_text(resp).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Month,Units (kWh),Bill,Rate,CO2 (kg)");
    assert_eq!(lines[1], "Jan,300.0,2000.00,6.00,246.0");
    assert_eq!(lines[2], "Mar,350.0,2600.00,7.00,287.0");
}

#[tokio::test]
async fn created_session_can_be_ended() {
    let app = app();
    let resp = http::create_session(State(app.clone())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["session_id"].as_str().unwrap().to_string();
    assert_eq!(app.sessions().len(), 1);

    let r = http::end_session(State(app.clone()), sid(&id)).await;
    assert_eq!(r.status(), StatusCode::NO_CONTENT);
    assert!(app.sessions().is_empty());
}

#[tokio::test]
async fn session_limit_answers_503() {
    let app = app_with("version: 1\nsessions:\n  max_sessions: 1\n");
    let r = http::create_session(State(app.clone())).await;
    assert_eq!(r.status(), StatusCode::CREATED);

    let r = http::report(State(app.clone()), sid("another")).await;
    assert_eq!(r.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(r).await["error"], "SESSION_LIMIT");
}

#[tokio::test]
async fn two_tier_config_reports_high() {
    let app = app_with("version: 1\nanalysis:\n  safety_policy: two_tier\n");
    submit(&app, "s", r#"{"month":"Jan","bill":1,"rate":1,"units":180}"#).await;
    let v = body_json(http::report(State(app.clone()), sid("s")).await).await;
    assert_eq!(v["safety"]["level"], "high");
}

#[tokio::test]
async fn sweep_drops_idle_sessions() {
    let app = app();
    submit(&app, "idle", r#"{"month":"Jan","bill":1,"rate":1,"units":1}"#).await;

    assert_eq!(session::sweep_once(&app, Instant::now()), 0);
    let later = Instant::now() + Duration::from_millis(app.cfg().sessions.idle_timeout_ms + 1_000);
    assert_eq!(session::sweep_once(&app, later), 1);
    assert!(app.sessions().is_empty());
    assert_eq!(app.metrics().sessions_swept.get(&[]), 1);
}

#[tokio::test]
async fn metrics_and_ops_endpoints() {
    let app = app();
    submit(&app, "m", r#"{"month":"Jan","bill":1,"rate":1,"units":1}"#).await;
    http::report(State(app.clone()), sid("m")).await;

    let text = body_text(ops::metrics(State(app.clone())).await).await;
    assert!(text.contains("wattwise_sessions_active 1"));
    assert!(text.contains(r#"wattwise_requests_total{route="submit_record",status="201"} 1"#));
    assert!(text.contains("wattwise_compute_duration_micros_count 1"));

    use axum::response::IntoResponse;
    let ready = ops::readyz(State(app.clone())).await.into_response();
    assert_eq!(ready.status(), StatusCode::OK);
    app.set_draining();
    let ready = ops::readyz(State(app.clone())).await.into_response();
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}
