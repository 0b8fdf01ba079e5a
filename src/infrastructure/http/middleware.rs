//! HTTP Middleware
//!
//! - 状态码错误日志
//! - 管理员会话校验

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::error::ApiError;
use super::state::AppState;

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：业务错误详情在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 从 `Authorization: Bearer` 或会话 Cookie 中取出令牌
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// 管理员路由守卫
///
/// 校验通过后把 `AdminSession` 放入请求扩展
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers(), &state.auth.cookie_name)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    let session = state
        .session_store
        .authenticate(&token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    tracing::debug!(admin_id = %session.admin_id, uri = %request.uri(), "Admin request");

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(ok_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_error_logging_passes_responses_through() {
        for (uri, status) in [
            ("/ok", StatusCode::OK),
            ("/not-found", StatusCode::NOT_FOUND),
            ("/error", StatusCode::INTERNAL_SERVER_ERROR),
        ] {
            let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
            let response = create_test_router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_session_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        headers.insert(header::COOKIE, HeaderValue::from_static("hsp_session=fromcookie"));
        assert_eq!(session_token(&headers, "hsp_session").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; hsp_session=tok; other=1"),
        );
        assert_eq!(session_token(&headers, "hsp_session").as_deref(), Some("tok"));
        assert_eq!(session_token(&headers, "missing"), None);
    }

    #[test]
    fn test_session_token_ignores_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(session_token(&headers, "hsp_session"), None);
    }
}
