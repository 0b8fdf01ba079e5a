//! SQLite Notice Repository
//!
//! 公告内容（含子公告）以 JSON 存储在 body 列

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{
    db_error, format_date, format_timestamp, parse_date, parse_timestamp, parse_uuid,
    serialization_error,
};
use super::DbPool;
use crate::application::ports::{NoticeRepositoryPort, Paged, Paging, RepositoryError};
use crate::domain::content::Title;
use crate::domain::notice::Notice;

/// SQLite Notice Repository
pub struct SqliteNoticeRepository {
    pool: DbPool,
}

impl SqliteNoticeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NoticeRow {
    id: String,
    title: String,
    published_on: String,
    body: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<NoticeRow> for Notice {
    type Error = RepositoryError;

    fn try_from(row: NoticeRow) -> Result<Self, Self::Error> {
        Ok(Notice {
            id: parse_uuid(&row.id)?,
            title: Title::new(&row.title).map_err(serialization_error)?,
            published_on: parse_date(&row.published_on)?,
            body: serde_json::from_str(&row.body).map_err(serialization_error)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

const NOTICE_COLUMNS: &str = "id, title, published_on, body, created_at, updated_at";

#[async_trait]
impl NoticeRepositoryPort for SqliteNoticeRepository {
    async fn save(&self, notice: &Notice) -> Result<(), RepositoryError> {
        let body = serde_json::to_string(&notice.body).map_err(serialization_error)?;

        sqlx::query(
            r#"
            INSERT INTO notices (id, title, published_on, kind, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                published_on = excluded.published_on,
                kind = excluded.kind,
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(notice.id.to_string())
        .bind(notice.title.as_str())
        .bind(format_date(&notice.published_on))
        .bind(notice.body.kind().as_str())
        .bind(body)
        .bind(format_timestamp(&notice.created_at))
        .bind(format_timestamp(&notice.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>, RepositoryError> {
        let row: Option<NoticeRow> =
            sqlx::query_as(&format!("SELECT {} FROM notices WHERE id = ?", NOTICE_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Notice::try_from).transpose()
    }

    async fn find_page(&self, paging: Paging) -> Result<Paged<Notice>, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notices")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        let rows: Vec<NoticeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM notices ORDER BY published_on DESC, created_at DESC LIMIT ? OFFSET ?",
            NOTICE_COLUMNS
        ))
        .bind(i64::from(paging.limit))
        .bind(paging.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let items = rows
            .into_iter()
            .map(Notice::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paged::new(items, total as u64, paging))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM notices WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn document_in_use(&self, file: &str) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notices
            WHERE json_extract(body, '$.file') = ?
               OR EXISTS (
                   SELECT 1 FROM json_each(notices.body, '$.items') AS item
                   WHERE json_extract(item.value, '$.file') = ?
               )
            "#,
        )
        .bind(file)
        .bind(file)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count > 0)
    }
}
