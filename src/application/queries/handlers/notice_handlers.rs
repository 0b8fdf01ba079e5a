//! Notice Query Handlers

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{NoticeRepositoryPort, Paged};
use crate::application::queries::{GetNotice, ListNotices};
use crate::domain::notice::{Notice, NoticeBody};

// ============================================================================
// Response DTOs
// ============================================================================

/// 公告列表项
#[derive(Debug, Clone, Serialize)]
pub struct NoticeSummary {
    pub id: Uuid,
    pub title: String,
    pub published_on: NaiveDate,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub sub_notice_count: usize,
}

impl From<Notice> for NoticeSummary {
    fn from(notice: Notice) -> Self {
        let kind = notice.body.kind().as_str();
        let (file, url, sub_notice_count) = match notice.body {
            NoticeBody::Document { file } => (Some(file), None, 0),
            NoticeBody::Url { url } => (None, Some(url), 0),
            NoticeBody::SubNotices { items } => (None, None, items.len()),
        };
        Self {
            id: notice.id,
            title: notice.title.into(),
            published_on: notice.published_on,
            kind,
            file,
            url,
            sub_notice_count,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Notice 查询处理器
pub struct NoticeQueryHandler {
    notice_repo: Arc<dyn NoticeRepositoryPort>,
}

impl NoticeQueryHandler {
    pub fn new(notice_repo: Arc<dyn NoticeRepositoryPort>) -> Self {
        Self { notice_repo }
    }

    pub async fn get(&self, query: GetNotice) -> Result<Notice, ApplicationError> {
        self.notice_repo
            .find_by_id(query.notice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Notice", query.notice_id))
    }

    pub async fn list(&self, query: ListNotices) -> Result<Paged<NoticeSummary>, ApplicationError> {
        let page = self.notice_repo.find_page(query.paging).await?;
        Ok(page.map(NoticeSummary::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Paging;
    use crate::application::testing::Fixture;
    use crate::domain::notice::NoticeDraft;

    fn notice(title: &str, day: u32) -> Notice {
        Notice::new(
            NoticeDraft::new(
                title,
                NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                "url",
                None,
                Some(format!("https://example.org/{}", day)),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_newest_first_with_paging() {
        let fx = Fixture::new().await;
        for day in 1..=5 {
            fx.notice_repo.save(&notice(&format!("Notice {}", day), day)).await.unwrap();
        }

        let handler = NoticeQueryHandler::new(fx.notice_repo.clone());
        let page = handler
            .list(ListNotices {
                paging: Paging::new(Some(2), Some(2)),
            })
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Notice 3");
        assert_eq!(page.items[0].kind, "url");
        assert_eq!(page.items[0].url.as_deref(), Some("https://example.org/3"));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let fx = Fixture::new().await;
        let handler = NoticeQueryHandler::new(fx.notice_repo.clone());
        let err = handler
            .get(GetNotice {
                notice_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
