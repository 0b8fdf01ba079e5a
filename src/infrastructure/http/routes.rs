//! HTTP Routes
//!
//! 公开接口:
//! - /api/ping                                    GET   健康检查
//! - /api/home                                    GET   首页（最新新闻与公告）
//! - /api/pages, /api/pages/:slug                 GET   已发布页面
//! - /api/news, /api/news/:id                     GET   已发布新闻（分页）
//! - /api/notices, /api/notices/:id               GET   公告（分页）
//! - /api/procurement/contractors[/:id]           GET   承包商
//! - /api/procurement/goods-categories            GET   货物类别
//! - /api/procurement/contracts/:kind[/:id]       GET   合同（?status= 过滤）
//! - /api/indicators[/:id]                        GET   结果框架指标
//! - /api/auth/login, /api/auth/logout            POST  登录 / 注销
//!
//! 管理接口（/api/admin，需要会话）:
//! - /me, /password, /users[/:id]
//! - /pages[/:id], /news[/:id]
//! - /notices[/:id], /notices/:id/sub-notices[/:sub_id]   multipart
//! - /procurement/contractors[/:id], /procurement/goods-categories[/:id]
//! - /procurement/contracts/:kind[/:id]
//! - /indicators[/:id], /indicators/:id/updates[/:update_id]
//! - /uploads                                             multipart

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::require_admin;
use super::state::AppState;

/// 创建所有 API 路由
pub fn create_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes(state))
}

fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/home", get(handlers::home))
        .route("/pages", get(handlers::list_published_pages))
        .route("/pages/:slug", get(handlers::get_published_page))
        .route("/news", get(handlers::list_published_news))
        .route("/news/:id", get(handlers::get_published_news))
        .route("/notices", get(handlers::list_notices))
        .route("/notices/:id", get(handlers::get_notice))
        .nest("/procurement", procurement_routes())
        .route("/indicators", get(handlers::list_indicators))
        .route("/indicators/:id", get(handlers::get_indicator))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .nest("/admin", admin_routes(state))
}

/// Procurement 公开路由
fn procurement_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contractors", get(handlers::list_contractors))
        .route("/contractors/:id", get(handlers::get_contractor))
        .route("/goods-categories", get(handlers::list_goods_categories))
        .route("/contracts/:kind", get(handlers::list_contracts))
        .route("/contracts/:kind/:id", get(handlers::get_contract))
}

/// 管理路由，全部经过 require_admin
fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(handlers::me))
        .route("/password", post(handlers::change_password))
        .route("/users", get(handlers::list_admins).post(handlers::create_admin))
        .route("/users/:id", delete(handlers::delete_admin))
        .route("/pages", get(handlers::admin_list_pages).post(handlers::create_page))
        .route(
            "/pages/:id",
            get(handlers::admin_get_page)
                .put(handlers::update_page)
                .delete(handlers::delete_page),
        )
        .route("/news", get(handlers::admin_list_news).post(handlers::create_news))
        .route(
            "/news/:id",
            get(handlers::admin_get_news)
                .put(handlers::update_news)
                .delete(handlers::delete_news),
        )
        .route("/notices", post(handlers::create_notice))
        .route(
            "/notices/:id",
            put(handlers::update_notice).delete(handlers::delete_notice),
        )
        .route("/notices/:id/sub-notices", post(handlers::add_sub_notice))
        .route(
            "/notices/:id/sub-notices/:sub_id",
            delete(handlers::remove_sub_notice),
        )
        .nest("/procurement", admin_procurement_routes())
        .route("/indicators", post(handlers::create_indicator))
        .route(
            "/indicators/:id",
            put(handlers::update_indicator).delete(handlers::delete_indicator),
        )
        .route("/indicators/:id/updates", post(handlers::add_status_update))
        .route(
            "/indicators/:id/updates/:update_id",
            delete(handlers::remove_status_update),
        )
        .route("/uploads", post(handlers::upload_file))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

fn admin_procurement_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contractors", post(handlers::create_contractor))
        .route(
            "/contractors/:id",
            put(handlers::update_contractor).delete(handlers::delete_contractor),
        )
        .route("/goods-categories", post(handlers::create_goods_category))
        .route(
            "/goods-categories/:id",
            put(handlers::update_goods_category).delete(handlers::delete_goods_category),
        )
        .route("/contracts/:kind", post(handlers::create_contract))
        .route(
            "/contracts/:kind/:id",
            put(handlers::update_contract).delete(handlers::delete_contract),
        )
}
