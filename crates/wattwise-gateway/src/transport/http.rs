//! Session HTTP handlers.
//!
//! Responsibilities:
//! - Validate the session id from the path
//! - Decode submit bodies strictly (unknown fields and bad months rejected)
//! - Run the operation against the session's own engine
//! - Count every response by route and status

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use wattwise_core::error::{Result, WattwiseError};
use wattwise_core::protocol::SubmitRecord;
use wattwise_core::{export, ResultBundle};

use crate::app_state::AppState;
use crate::context::SessionId;
use crate::transport::ApiError;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct RecordAccepted {
    /// Records held by the session after the append.
    pub count: usize,
}

// --------------------
// Response bookkeeping
// --------------------
fn finish(app: &AppState, route: &'static str, res: Result<Response>) -> Response {
    let resp = match res {
        Ok(resp) => resp,
        Err(e) => {
            match &e {
                WattwiseError::EmptyDataset => {
                    app.metrics().empty_dataset.inc(&[]);
                    tracing::debug!(route, "report requested before any record");
                }
                WattwiseError::InvalidRecord(_) => {
                    app.metrics().records_rejected.inc(&[]);
                    tracing::warn!(route, error = %e, "record rejected");
                }
                _ => tracing::warn!(route, error = %e, "request failed"),
            }
            ApiError(e).into_response()
        }
    };
    app.metrics()
        .requests
        .inc(&[("route", route), ("status", resp.status().as_str())]);
    resp
}

fn compute(app: &AppState, sid: &SessionId) -> Result<ResultBundle> {
    let policy = app.safety_policy();
    let started = Instant::now();
    let res = app.sessions().with_engine(sid, |e| e.compute_with(policy))?;
    app.metrics().compute_duration.observe(&[], started.elapsed());
    res
}

// --------------------
// Handlers
// --------------------

/// `POST /v1/sessions`
pub async fn create_session(State(app): State<AppState>) -> Response {
    let res = app.sessions().create().map(|sid| {
        tracing::info!(session = %sid, "session created");
        (
            StatusCode::CREATED,
            Json(SessionCreated {
                session_id: sid.to_string(),
            }),
        )
            .into_response()
    });
    finish(&app, "create_session", res)
}

/// `DELETE /v1/sessions/:sid`
pub async fn end_session(State(app): State<AppState>, Path(raw): Path<String>) -> Response {
    let res = SessionId::parse(&raw).map(|sid| {
        let existed = app.sessions().end(&sid);
        tracing::info!(session = %sid, existed, "session ended");
        StatusCode::NO_CONTENT.into_response()
    });
    finish(&app, "end_session", res)
}

/// `POST /v1/sessions/:sid/records`
pub async fn submit_record(
    State(app): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Response {
    let res = append_record(&app, &raw, &body);
    finish(&app, "submit_record", res)
}

fn append_record(app: &AppState, raw: &str, body: &[u8]) -> Result<Response> {
    let sid = SessionId::parse(raw)?;
    let body = std::str::from_utf8(body)
        .map_err(|e| WattwiseError::BadRequest(format!("submit body is not utf-8: {e}")))?;
    let record = SubmitRecord::from_json(body)?.into_record()?;
    let count = app
        .sessions()
        .with_engine(&sid, |e| e.append(record).map(|_| e.len()))??;
    app.metrics().records_appended.inc(&[]);
    tracing::debug!(session = %sid, month = %record.month, count, "record accepted");
    Ok((StatusCode::CREATED, Json(RecordAccepted { count })).into_response())
}

/// `DELETE /v1/sessions/:sid/records`
pub async fn clear_records(State(app): State<AppState>, Path(raw): Path<String>) -> Response {
    let res = SessionId::parse(&raw).and_then(|sid| {
        app.sessions().with_engine(&sid, |e| e.clear())?;
        tracing::debug!(session = %sid, "records cleared");
        Ok(StatusCode::NO_CONTENT.into_response())
    });
    finish(&app, "clear_records", res)
}

/// `GET /v1/sessions/:sid/report`
pub async fn report(State(app): State<AppState>, Path(raw): Path<String>) -> Response {
    let res = SessionId::parse(&raw)
        .and_then(|sid| compute(&app, &sid))
        .map(|bundle| Json(bundle).into_response());
    finish(&app, "report", res)
}

/// `GET /v1/sessions/:sid/export.csv`
pub async fn export_csv(State(app): State<AppState>, Path(raw): Path<String>) -> Response {
    let res = render_csv(&app, &raw);
    finish(&app, "export_csv", res)
}

fn render_csv(app: &AppState, raw: &str) -> Result<Response> {
    let sid = SessionId::parse(raw)?;
    let bundle = compute(app, &sid)?;
    let body = export::to_csv_string(&bundle.table)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"wattwise.csv\""),
        ],
        body,
    )
        .into_response())
}
