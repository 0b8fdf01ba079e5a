//! SQLite Page / News Repositories

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{
    db_error, format_date, format_timestamp, parse_date, parse_timestamp, parse_uuid,
    serialization_error,
};
use super::DbPool;
use crate::application::ports::{
    NewsRepositoryPort, PageRepositoryPort, Paged, Paging, RepositoryError,
};
use crate::domain::content::{NewsItem, Page, Slug, Title};

// ============================================================================
// Page
// ============================================================================

/// SQLite Page Repository
pub struct SqlitePageRepository {
    pool: DbPool,
}

impl SqlitePageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PageRow {
    id: String,
    slug: String,
    title: String,
    content_html: String,
    builder_data: Option<String>,
    published: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PageRow> for Page {
    type Error = RepositoryError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        Ok(Page {
            id: parse_uuid(&row.id)?,
            slug: Slug::parse(row.slug).map_err(serialization_error)?,
            title: Title::new(&row.title).map_err(serialization_error)?,
            content_html: row.content_html,
            builder_data: row
                .builder_data
                .map(|raw| serde_json::from_str(&raw))
                .transpose()
                .map_err(serialization_error)?,
            published: row.published,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

const PAGE_COLUMNS: &str =
    "id, slug, title, content_html, builder_data, published, created_at, updated_at";

#[async_trait]
impl PageRepositoryPort for SqlitePageRepository {
    async fn save(&self, page: &Page) -> Result<(), RepositoryError> {
        let builder_data = page
            .builder_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(serialization_error)?;

        sqlx::query(
            r#"
            INSERT INTO pages (id, slug, title, content_html, builder_data, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                slug = excluded.slug,
                title = excluded.title,
                content_html = excluded.content_html,
                builder_data = excluded.builder_data,
                published = excluded.published,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(page.id.to_string())
        .bind(page.slug.as_str())
        .bind(page.title.as_str())
        .bind(&page.content_html)
        .bind(builder_data)
        .bind(page.published)
        .bind(format_timestamp(&page.created_at))
        .bind(format_timestamp(&page.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Page>, RepositoryError> {
        let row: Option<PageRow> =
            sqlx::query_as(&format!("SELECT {} FROM pages WHERE id = ?", PAGE_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Page::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, RepositoryError> {
        let row: Option<PageRow> =
            sqlx::query_as(&format!("SELECT {} FROM pages WHERE slug = ?", PAGE_COLUMNS))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Page::try_from).transpose()
    }

    async fn find_all(&self, published_only: bool) -> Result<Vec<Page>, RepositoryError> {
        let rows: Vec<PageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM pages WHERE (? = 0 OR published = 1) ORDER BY title COLLATE NOCASE",
            PAGE_COLUMNS
        ))
        .bind(published_only)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Page::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

// ============================================================================
// News
// ============================================================================

/// SQLite News Repository
pub struct SqliteNewsRepository {
    pool: DbPool,
}

impl SqliteNewsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NewsRow {
    id: String,
    slug: String,
    title: String,
    summary: String,
    body_html: String,
    cover_image: Option<String>,
    gallery: String,
    published_on: String,
    published: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<NewsRow> for NewsItem {
    type Error = RepositoryError;

    fn try_from(row: NewsRow) -> Result<Self, Self::Error> {
        Ok(NewsItem {
            id: parse_uuid(&row.id)?,
            title: Title::new(&row.title).map_err(serialization_error)?,
            slug: Slug::parse(row.slug).map_err(serialization_error)?,
            summary: row.summary,
            body_html: row.body_html,
            cover_image: row.cover_image,
            gallery: serde_json::from_str(&row.gallery).map_err(serialization_error)?,
            published_on: parse_date(&row.published_on)?,
            published: row.published,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

const NEWS_COLUMNS: &str = "id, slug, title, summary, body_html, cover_image, gallery, published_on, published, created_at, updated_at";

#[async_trait]
impl NewsRepositoryPort for SqliteNewsRepository {
    async fn save(&self, item: &NewsItem) -> Result<(), RepositoryError> {
        let gallery = serde_json::to_string(&item.gallery).map_err(serialization_error)?;

        sqlx::query(
            r#"
            INSERT INTO news (id, slug, title, summary, body_html, cover_image, gallery, published_on, published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                slug = excluded.slug,
                title = excluded.title,
                summary = excluded.summary,
                body_html = excluded.body_html,
                cover_image = excluded.cover_image,
                gallery = excluded.gallery,
                published_on = excluded.published_on,
                published = excluded.published,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(item.id.to_string())
        .bind(item.slug.as_str())
        .bind(item.title.as_str())
        .bind(&item.summary)
        .bind(&item.body_html)
        .bind(item.cover_image.as_deref())
        .bind(gallery)
        .bind(format_date(&item.published_on))
        .bind(item.published)
        .bind(format_timestamp(&item.created_at))
        .bind(format_timestamp(&item.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsItem>, RepositoryError> {
        let row: Option<NewsRow> =
            sqlx::query_as(&format!("SELECT {} FROM news WHERE id = ?", NEWS_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(NewsItem::try_from).transpose()
    }

    async fn find_page(
        &self,
        published_only: bool,
        paging: Paging,
    ) -> Result<Paged<NewsItem>, RepositoryError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM news WHERE (? = 0 OR published = 1)")
                .bind(published_only)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error)?;

        let rows: Vec<NewsRow> = sqlx::query_as(&format!(
            "SELECT {} FROM news WHERE (? = 0 OR published = 1) ORDER BY published_on DESC, created_at DESC LIMIT ? OFFSET ?",
            NEWS_COLUMNS
        ))
        .bind(published_only)
        .bind(i64::from(paging.limit))
        .bind(paging.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let items = rows
            .into_iter()
            .map(NewsItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paged::new(items, total as u64, paging))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
