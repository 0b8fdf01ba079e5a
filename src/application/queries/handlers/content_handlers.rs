//! Content Query Handlers - 页面、新闻、首页

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{NewsRepositoryPort, NoticeRepositoryPort, PageRepositoryPort, Paged, Paging};
use crate::application::queries::handlers::NoticeSummary;
use crate::application::queries::{GetHome, GetNews, GetPage, GetPublishedPage, ListNews, ListPages};
use crate::domain::content::{NewsItem, Page};

// ============================================================================
// Response DTOs
// ============================================================================

/// 页面列表项（不含正文）
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<Page> for PageSummary {
    fn from(page: Page) -> Self {
        Self {
            id: page.id,
            slug: page.slug.into(),
            title: page.title.into(),
            published: page.published,
            updated_at: page.updated_at,
        }
    }
}

/// 新闻列表项
#[derive(Debug, Clone, Serialize)]
pub struct NewsSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub cover_image: Option<String>,
    pub published_on: NaiveDate,
    pub published: bool,
}

impl From<NewsItem> for NewsSummary {
    fn from(item: NewsItem) -> Self {
        Self {
            id: item.id,
            slug: item.slug.into(),
            title: item.title.into(),
            summary: item.summary,
            cover_image: item.cover_image,
            published_on: item.published_on,
            published: item.published,
        }
    }
}

/// 首页数据
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub latest_news: Vec<NewsSummary>,
    pub latest_notices: Vec<NoticeSummary>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Page 查询处理器
pub struct PageQueryHandler {
    page_repo: Arc<dyn PageRepositoryPort>,
}

impl PageQueryHandler {
    pub fn new(page_repo: Arc<dyn PageRepositoryPort>) -> Self {
        Self { page_repo }
    }

    pub async fn get(&self, query: GetPage) -> Result<Page, ApplicationError> {
        self.page_repo
            .find_by_id(query.page_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Page", query.page_id))
    }

    /// 未发布页面对前台不可见
    pub async fn get_published(&self, query: GetPublishedPage) -> Result<Page, ApplicationError> {
        self.page_repo
            .find_by_slug(&query.slug)
            .await?
            .filter(Page::is_visible)
            .ok_or_else(|| ApplicationError::not_found_str("Page", &query.slug))
    }

    pub async fn list(&self, query: ListPages) -> Result<Vec<PageSummary>, ApplicationError> {
        let pages = self.page_repo.find_all(query.published_only).await?;
        Ok(pages.into_iter().map(PageSummary::from).collect())
    }
}

/// News 查询处理器
pub struct NewsQueryHandler {
    news_repo: Arc<dyn NewsRepositoryPort>,
}

impl NewsQueryHandler {
    pub fn new(news_repo: Arc<dyn NewsRepositoryPort>) -> Self {
        Self { news_repo }
    }

    pub async fn get(&self, query: GetNews) -> Result<NewsItem, ApplicationError> {
        self.news_repo
            .find_by_id(query.news_id)
            .await?
            .filter(|item| item.published || !query.published_only)
            .ok_or_else(|| ApplicationError::not_found("News", query.news_id))
    }

    pub async fn list(&self, query: ListNews) -> Result<Paged<NewsSummary>, ApplicationError> {
        let page = self
            .news_repo
            .find_page(query.published_only, query.paging)
            .await?;
        Ok(page.map(NewsSummary::from))
    }
}

/// 首页查询处理器
pub struct HomeQueryHandler {
    news_repo: Arc<dyn NewsRepositoryPort>,
    notice_repo: Arc<dyn NoticeRepositoryPort>,
}

impl HomeQueryHandler {
    pub fn new(news_repo: Arc<dyn NewsRepositoryPort>, notice_repo: Arc<dyn NoticeRepositoryPort>) -> Self {
        Self {
            news_repo,
            notice_repo,
        }
    }

    pub async fn handle(&self, query: GetHome) -> Result<HomeView, ApplicationError> {
        let news = self
            .news_repo
            .find_page(true, Paging::new(Some(1), Some(query.news_limit)))
            .await?;
        let notices = self
            .notice_repo
            .find_page(Paging::new(Some(1), Some(query.notice_limit)))
            .await?;

        Ok(HomeView {
            latest_news: news.items.into_iter().map(NewsSummary::from).collect(),
            latest_notices: notices.items.into_iter().map(NoticeSummary::from).collect(),
        })
    }
}
