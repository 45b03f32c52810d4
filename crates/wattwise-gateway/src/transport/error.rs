//! HTTP mapping of `WattwiseError`.
//!
//! Every non-2xx body has the shape `{"error": CODE, "message": text}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use wattwise_core::error::{ClientCode, WattwiseError};

#[derive(Debug)]
pub struct ApiError(pub WattwiseError);

impl From<WattwiseError> for ApiError {
    fn from(e: WattwiseError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest | ClientCode::InvalidRecord | ClientCode::UnsupportedVersion => {
                StatusCode::BAD_REQUEST
            }
            ClientCode::EmptyDataset => StatusCode::UNPROCESSABLE_ENTITY,
            ClientCode::SessionLimit => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
