//! HTTP Error Handling
//!
//! 错误响应沿用 `{errno, error, data}` 格式，HTTP 状态码与 errno 一致

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const UNAUTHORIZED: i32 = 401;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const PAYLOAD_TOO_LARGE: i32 = 413;
    pub const UNPROCESSABLE: i32 = 422;
    pub const INTERNAL_ERROR: i32 = 500;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Unauthorized(_) => errno::UNAUTHORIZED,
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::Conflict(_) => errno::CONFLICT,
            ApiError::PayloadTooLarge(_) => errno::PAYLOAD_TOO_LARGE,
            ApiError::Unprocessable(_) => errno::UNPROCESSABLE,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let status = u16::try_from(errno)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self {
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno, error = %msg, "Internal server error");
            }
            ApiError::NotFound(msg) => {
                tracing::debug!(errno = errno, error = %msg, "Resource not found");
            }
            other => {
                tracing::warn!(errno = errno, error = %other.message(), "Request rejected");
            }
        }

        // 内部错误细节只写日志
        let message = match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.message().to_string(),
        };

        (status, Json(ErrorResponse::new(errno, message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            ApplicationError::BusinessRuleViolation(msg) => ApiError::Unprocessable(msg),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_matches_errno() {
        let response = ApiError::Conflict("slug taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["errno"], 409);
        assert_eq!(body["error"], "slug taken");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = ApiError::Internal("database is locked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }

    #[test]
    fn test_application_error_mapping() {
        assert!(matches!(
            ApiError::from(ApplicationError::business_rule("last admin")),
            ApiError::Unprocessable(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::unauthorized("bad password")),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::validation("title required")),
            ApiError::BadRequest(_)
        ));
    }
}
