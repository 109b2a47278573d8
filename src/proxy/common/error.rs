// 错误处理
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::proxy::mappers::normalizer::NormalizeError;
use crate::proxy::upstream::UpstreamError;

/// Message shown to callers for every 500.
pub const CONVERSION_FAILED_MESSAGE: &str = "AI 변환 중 오류가 발생했습니다.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "POST 요청만 허용됩니다.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request fields. Never reaches the upstream.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,

    #[error("Upstream API error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Malformed model output: {0}")]
    MalformedOutput(#[from] NormalizeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(_) | ApiError::MalformedOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Raw cause passed back to callers in `details`.
    fn details(&self) -> String {
        match self {
            ApiError::Upstream(e) => e.to_string(),
            ApiError::MalformedOutput(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        let body = if status.is_server_error() {
            json!({
                "success": false,
                "error": CONVERSION_FAILED_MESSAGE,
                "details": self.details(),
            })
        } else {
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}
