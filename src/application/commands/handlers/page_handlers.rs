//! Page Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreatePage, DeletePage, PageInput, UpdatePage};
use crate::application::error::ApplicationError;
use crate::application::ports::PageRepositoryPort;
use crate::domain::content::{Page, PageDraft, Slug, Title};

/// Page 命令处理器（创建 / 更新 / 删除）
pub struct PageCommandHandler {
    page_repo: Arc<dyn PageRepositoryPort>,
}

impl PageCommandHandler {
    pub fn new(page_repo: Arc<dyn PageRepositoryPort>) -> Self {
        Self { page_repo }
    }

    pub async fn create(&self, command: CreatePage) -> Result<Page, ApplicationError> {
        let draft = page_draft(command.input)?;
        self.ensure_slug_free(&draft.slug, None).await?;

        let page = Page::new(draft);
        self.page_repo.save(&page).await?;

        tracing::info!(page_id = %page.id, slug = %page.slug, "Page created");

        Ok(page)
    }

    pub async fn update(&self, command: UpdatePage) -> Result<Page, ApplicationError> {
        let mut page = self
            .page_repo
            .find_by_id(command.page_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Page", command.page_id))?;

        let draft = page_draft(command.input)?;
        self.ensure_slug_free(&draft.slug, Some(page.id)).await?;

        page.apply(draft);
        self.page_repo.save(&page).await?;

        tracing::info!(page_id = %page.id, slug = %page.slug, published = page.published, "Page updated");

        Ok(page)
    }

    pub async fn delete(&self, command: DeletePage) -> Result<(), ApplicationError> {
        let page = self
            .page_repo
            .find_by_id(command.page_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Page", command.page_id))?;

        self.page_repo.delete(page.id).await?;

        tracing::info!(page_id = %page.id, slug = %page.slug, "Page deleted");

        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &Slug, owner: Option<Uuid>) -> Result<(), ApplicationError> {
        match self.page_repo.find_by_slug(slug.as_str()).await? {
            Some(existing) if Some(existing.id) != owner => Err(ApplicationError::conflict(format!(
                "Page slug already in use: {}",
                slug
            ))),
            _ => Ok(()),
        }
    }
}

fn page_draft(input: PageInput) -> Result<PageDraft, ApplicationError> {
    Ok(PageDraft {
        slug: Slug::parse(input.slug.trim())?,
        title: Title::new(&input.title)?,
        content_html: input.content_html,
        builder_data: input.builder_data,
        published: input.published,
    })
}
