//! Auth HTTP Handlers - 登录、注销、管理员账号

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{ChangePassword, CreateAdmin, DeleteAdmin, Login, Logout};
use crate::application::queries::handlers::AdminView;
use crate::application::queries::{GetAdmin, ListAdmins};
use crate::application::AdminSession;
use crate::infrastructure::http::dto::{ApiResponse, ApiResult, Empty, JsonBody};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::session_token;
use crate::infrastructure::http::state::{AppState, AuthSettings};

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin_id: Uuid,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
}

fn session_cookie(auth: &AuthSettings, token: &str) -> String {
    cookie_with_attributes(auth, token, auth.session_ttl_secs)
}

fn expired_cookie(auth: &AuthSettings) -> String {
    cookie_with_attributes(auth, "", 0)
}

fn cookie_with_attributes(auth: &AuthSettings, value: &str, max_age: u64) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        auth.cookie_name, value, max_age
    );
    if auth.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

// ============================================================================
// Handlers
// ============================================================================

/// 登录：返回令牌并设置会话 Cookie
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .auth_commands
        .login(Login {
            username: req.username,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie(&state.auth, &session.token);
    let body = LoginResponse {
        token: session.token,
        admin_id: session.admin_id,
        username: session.username,
        expires_at: session.expires_at,
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(ApiResponse::success(body))))
}

/// 注销：令牌缺失或已失效也返回成功
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers, &state.auth.cookie_name) {
        state.auth_commands.logout(Logout { token }).await;
    }

    (
        [(header::SET_COOKIE, expired_cookie(&state.auth))],
        Json(ApiResponse::ok()),
    )
}

/// 当前登录的管理员
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<AdminView> {
    let admin = state
        .admin_queries
        .get(GetAdmin {
            admin_id: session.admin_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(admin)))
}

/// 修改密码，同时注销该账号的其他会话
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> ApiResult<Empty> {
    state
        .auth_commands
        .change_password(ChangePassword {
            admin_id: session.admin_id,
            token: session.token,
            current_password: req.current_password,
            new_password: req.new_password,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn list_admins(State(state): State<Arc<AppState>>) -> ApiResult<Vec<AdminView>> {
    let admins = state.admin_queries.list(ListAdmins).await?;
    Ok(Json(ApiResponse::success(admins)))
}

pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateAdminRequest>,
) -> ApiResult<AdminView> {
    let admin = state
        .auth_commands
        .create_admin(CreateAdmin {
            username: req.username,
            password: req.password,
        })
        .await?;
    Ok(Json(ApiResponse::success(AdminView::from(admin))))
}

pub async fn delete_admin(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<AdminSession>,
    Path(admin_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state
        .auth_commands
        .delete_admin(DeleteAdmin {
            actor_id: session.admin_id,
            admin_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secure_cookie: bool) -> AuthSettings {
        AuthSettings {
            cookie_name: "hsp_session".to_string(),
            session_ttl_secs: 3600,
            password_iterations: 1,
            secure_cookie,
        }
    }

    #[test]
    fn test_cookie_without_secure_flag() {
        let auth = settings(false);
        assert_eq!(
            session_cookie(&auth, "abc"),
            "hsp_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );
        assert!(!expired_cookie(&auth).contains("Secure"));
    }

    #[test]
    fn test_cookie_with_secure_flag() {
        let auth = settings(true);
        assert_eq!(
            session_cookie(&auth, "abc"),
            "hsp_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert_eq!(
            expired_cookie(&auth),
            "hsp_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure"
        );
    }
}
