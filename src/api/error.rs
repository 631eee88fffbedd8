//! Mapping library errors onto HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::error;
use tracing::warn;

use crate::api::types::ErrorResponse;
use crate::TextScopeError;

/// Handler error: validation failures are 400, everything else 500
#[derive(Debug)]
pub struct ApiError(pub TextScopeError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<TextScopeError> for ApiError {
    fn from(err: TextScopeError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TextScopeError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Rejected request: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError(TextScopeError::Validation("No text provided".into()));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let analyzer = ApiError(TextScopeError::analyzer("emotion", "boom"));
        assert_eq!(analyzer.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let timeout = ApiError(TextScopeError::Timeout(30));
        assert_eq!(timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_response_status() {
        let response = ApiError(TextScopeError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
