//! Content HTTP Handlers - 首页、页面与新闻

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    CreateNews, CreatePage, DeleteNews, DeletePage, NewsInput, PageInput, UpdateNews, UpdatePage,
};
use crate::application::queries::handlers::{HomeView, NewsSummary, PageSummary};
use crate::application::queries::{
    GetHome, GetNews, GetPage, GetPublishedPage, ListNews, ListPages,
};
use crate::application::Paged;
use crate::domain::content::{NewsItem, Page};
use crate::infrastructure::http::dto::{ApiResponse, ApiResult, Empty, JsonBody, PagingParams};
use crate::infrastructure::http::state::AppState;

/// 首页每类条目上限
const HOME_MAX_ITEMS: u32 = 20;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    pub news_limit: Option<u32>,
    pub notice_limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content_html: String,
    #[serde(default)]
    pub builder_data: Option<serde_json::Value>,
    #[serde(default)]
    pub published: bool,
}

impl From<PageRequest> for PageInput {
    fn from(req: PageRequest) -> Self {
        Self {
            slug: req.slug,
            title: req.title,
            content_html: req.content_html,
            builder_data: req.builder_data,
            published: req.published,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body_html: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub published_on: NaiveDate,
    #[serde(default)]
    pub published: bool,
}

impl From<NewsRequest> for NewsInput {
    fn from(req: NewsRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            summary: req.summary,
            body_html: req.body_html,
            cover_image: req.cover_image,
            gallery: req.gallery,
            published_on: req.published_on,
            published: req.published,
        }
    }
}

// ============================================================================
// Public handlers
// ============================================================================

/// 首页：最新新闻与公告
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HomeParams>,
) -> ApiResult<HomeView> {
    let defaults = GetHome::default();
    let query = GetHome {
        news_limit: params.news_limit.unwrap_or(defaults.news_limit).clamp(1, HOME_MAX_ITEMS),
        notice_limit: params
            .notice_limit
            .unwrap_or(defaults.notice_limit)
            .clamp(1, HOME_MAX_ITEMS),
    };

    let view = state.home_queries.handle(query).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 已发布页面列表
pub async fn list_published_pages(State(state): State<Arc<AppState>>) -> ApiResult<Vec<PageSummary>> {
    let pages = state
        .page_queries
        .list(ListPages {
            published_only: true,
        })
        .await?;
    Ok(Json(ApiResponse::success(pages)))
}

/// 按 slug 获取已发布页面
pub async fn get_published_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Page> {
    let page = state.page_queries.get_published(GetPublishedPage { slug }).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn list_published_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagingParams>,
) -> ApiResult<Paged<NewsSummary>> {
    let news = state
        .news_queries
        .list(ListNews {
            published_only: true,
            paging: params.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(news)))
}

pub async fn get_published_news(
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
) -> ApiResult<NewsItem> {
    let item = state
        .news_queries
        .get(GetNews {
            news_id,
            published_only: true,
        })
        .await?;
    Ok(Json(ApiResponse::success(item)))
}

// ============================================================================
// Admin handlers
// ============================================================================

pub async fn admin_list_pages(State(state): State<Arc<AppState>>) -> ApiResult<Vec<PageSummary>> {
    let pages = state
        .page_queries
        .list(ListPages {
            published_only: false,
        })
        .await?;
    Ok(Json(ApiResponse::success(pages)))
}

pub async fn admin_get_page(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<Uuid>,
) -> ApiResult<Page> {
    let page = state.page_queries.get(GetPage { page_id }).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn create_page(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<PageRequest>,
) -> ApiResult<Page> {
    let page = state.page_commands.create(CreatePage { input: req.into() }).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn update_page(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<Uuid>,
    JsonBody(req): JsonBody<PageRequest>,
) -> ApiResult<Page> {
    let page = state
        .page_commands
        .update(UpdatePage {
            page_id,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn delete_page(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state.page_commands.delete(DeletePage { page_id }).await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn admin_list_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagingParams>,
) -> ApiResult<Paged<NewsSummary>> {
    let news = state
        .news_queries
        .list(ListNews {
            published_only: false,
            paging: params.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(news)))
}

pub async fn admin_get_news(
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
) -> ApiResult<NewsItem> {
    let item = state
        .news_queries
        .get(GetNews {
            news_id,
            published_only: false,
        })
        .await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewsRequest>,
) -> ApiResult<NewsItem> {
    let item = state.news_commands.create(CreateNews { input: req.into() }).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn update_news(
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
    JsonBody(req): JsonBody<NewsRequest>,
) -> ApiResult<NewsItem> {
    let item = state
        .news_commands
        .update(UpdateNews {
            news_id,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state.news_commands.delete(DeleteNews { news_id }).await?;
    Ok(Json(ApiResponse::ok()))
}
