//! Axum router wiring.
//!
//! Session routes under `/v1/sessions`, ops endpoints at the root.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/sessions", post(http::create_session))
        .route("/v1/sessions/:sid", delete(http::end_session))
        .route(
            "/v1/sessions/:sid/records",
            post(http::submit_record).delete(http::clear_records),
        )
        .route("/v1/sessions/:sid/report", get(http::report))
        .route("/v1/sessions/:sid/export.csv", get(http::export_csv))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
