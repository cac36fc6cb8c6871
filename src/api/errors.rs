use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::SpotcheckError;

impl SpotcheckError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SpotcheckError::Config(_) | SpotcheckError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            SpotcheckError::NotFound(_) => StatusCode::NOT_FOUND,
            SpotcheckError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SpotcheckError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
