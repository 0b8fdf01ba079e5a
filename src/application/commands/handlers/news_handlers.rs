//! News Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateNews, DeleteNews, NewsInput, UpdateNews};
use crate::application::error::ApplicationError;
use crate::application::ports::NewsRepositoryPort;
use crate::domain::content::{NewsDraft, NewsItem};

/// News 命令处理器
pub struct NewsCommandHandler {
    news_repo: Arc<dyn NewsRepositoryPort>,
}

impl NewsCommandHandler {
    pub fn new(news_repo: Arc<dyn NewsRepositoryPort>) -> Self {
        Self { news_repo }
    }

    pub async fn create(&self, command: CreateNews) -> Result<NewsItem, ApplicationError> {
        let item = NewsItem::new(news_draft(command.input)?);
        self.news_repo.save(&item).await?;

        tracing::info!(
            news_id = %item.id,
            slug = %item.slug,
            images = item.images().count(),
            "News created"
        );

        Ok(item)
    }

    pub async fn update(&self, command: UpdateNews) -> Result<NewsItem, ApplicationError> {
        let mut item = self
            .news_repo
            .find_by_id(command.news_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("News", command.news_id))?;

        item.apply(news_draft(command.input)?);
        self.news_repo.save(&item).await?;

        tracing::info!(news_id = %item.id, published = item.published, "News updated");

        Ok(item)
    }

    pub async fn delete(&self, command: DeleteNews) -> Result<(), ApplicationError> {
        let item = self
            .news_repo
            .find_by_id(command.news_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("News", command.news_id))?;

        self.news_repo.delete(item.id).await?;

        tracing::info!(news_id = %item.id, title = %item.title, "News deleted");

        Ok(())
    }
}

fn news_draft(input: NewsInput) -> Result<NewsDraft, ApplicationError> {
    Ok(NewsDraft::new(
        &input.title,
        input.slug.as_deref(),
        &input.summary,
        input.body_html,
        input.cover_image,
        input.gallery,
        input.published_on,
        input.published,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Paging;
    use crate::application::testing::Fixture;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn input(title: &str) -> NewsInput {
        NewsInput {
            title: title.to_string(),
            slug: None,
            summary: "Summary".to_string(),
            body_html: "<p>Body</p>".to_string(),
            cover_image: Some("/uploads/images/cover.jpg".to_string()),
            gallery: vec!["/uploads/images/1.jpg".to_string()],
            published_on: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            published: true,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let fx = Fixture::new().await;
        let handler = NewsCommandHandler::new(fx.news_repo.clone());

        let item = handler
            .create(CreateNews {
                input: input("Community clinics reopen"),
            })
            .await
            .unwrap();
        assert_eq!(item.slug.as_str(), "community-clinics-reopen");

        let mut changed = input("Community clinics reopen");
        changed.published = false;
        changed.gallery.clear();
        let updated = handler
            .update(UpdateNews {
                news_id: item.id,
                input: changed,
            })
            .await
            .unwrap();
        assert!(!updated.published);
        assert!(updated.gallery.is_empty());

        handler.delete(DeleteNews { news_id: item.id }).await.unwrap();
        let page = fx.news_repo.find_page(false, Paging::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let fx = Fixture::new().await;
        let handler = NewsCommandHandler::new(fx.news_repo.clone());

        handler.create(CreateNews { input: input("Same title") }).await.unwrap();
        let err = handler
            .create(CreateNews { input: input("Same title") })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let fx = Fixture::new().await;
        let handler = NewsCommandHandler::new(fx.news_repo.clone());
        let err = handler
            .update(UpdateNews {
                news_id: Uuid::new_v4(),
                input: input("x news"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
