//! Notice HTTP Handlers
//!
//! 管理端使用 multipart 表单，便于同时上传 PDF

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    AddSubNotice, CreateNotice, DeleteNotice, NoticeInput, RemoveSubNotice, UpdateNotice, Upload,
};
use crate::application::queries::handlers::NoticeSummary;
use crate::application::queries::{GetNotice, ListNotices};
use crate::application::Paged;
use crate::domain::notice::{Notice, SubNotice};
use crate::infrastructure::http::dto::{
    file_field, multipart_error, text_field, ApiResponse, ApiResult, Empty, PagingParams,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Form
// ============================================================================

/// 公告表单字段：title, published_on, type, file, url, document(文件)
#[derive(Debug, Default)]
struct NoticeForm {
    title: Option<String>,
    published_on: Option<String>,
    kind: Option<String>,
    file: Option<String>,
    url: Option<String>,
    upload: Option<Upload>,
}

impl NoticeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "title" => form.title = text_field(field).await?,
                "published_on" => form.published_on = text_field(field).await?,
                "type" => form.kind = text_field(field).await?,
                "file" => form.file = text_field(field).await?,
                "url" => form.url = text_field(field).await?,
                "document" => form.upload = file_field(field).await?,
                other => tracing::debug!(field = %other, "Ignoring unknown notice form field"),
            }
        }

        Ok(form)
    }

    fn title(&mut self) -> Result<String, ApiError> {
        self.title
            .take()
            .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))
    }

    fn into_input(mut self) -> Result<NoticeInput, ApiError> {
        let title = self.title()?;
        let published_on = self
            .published_on
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("published_on is required".to_string()))
            .and_then(parse_date)?;
        let kind = self
            .kind
            .ok_or_else(|| ApiError::BadRequest("Notice type is required".to_string()))?;

        Ok(NoticeInput {
            title,
            published_on,
            kind,
            file: self.file,
            url: self.url,
            upload: self.upload,
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}

// ============================================================================
// Public handlers
// ============================================================================

pub async fn list_notices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagingParams>,
) -> ApiResult<Paged<NoticeSummary>> {
    let notices = state
        .notice_queries
        .list(ListNotices {
            paging: params.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(notices)))
}

pub async fn get_notice(
    State(state): State<Arc<AppState>>,
    Path(notice_id): Path<Uuid>,
) -> ApiResult<Notice> {
    let notice = state.notice_queries.get(GetNotice { notice_id }).await?;
    Ok(Json(ApiResponse::success(notice)))
}

// ============================================================================
// Admin handlers
// ============================================================================

pub async fn create_notice(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Notice> {
    let input = NoticeForm::read(multipart).await?.into_input()?;
    let notice = state.notice_commands.create(CreateNotice { input }).await?;
    Ok(Json(ApiResponse::success(notice)))
}

pub async fn update_notice(
    State(state): State<Arc<AppState>>,
    Path(notice_id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<Notice> {
    let input = NoticeForm::read(multipart).await?.into_input()?;
    let notice = state
        .notice_commands
        .update(UpdateNotice { notice_id, input })
        .await?;
    Ok(Json(ApiResponse::success(notice)))
}

/// 删除公告及其上传的文档
pub async fn delete_notice(
    State(state): State<Arc<AppState>>,
    Path(notice_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state.notice_commands.delete(DeleteNotice { notice_id }).await?;
    Ok(Json(ApiResponse::ok()))
}

/// 添加子公告（title + file / url / document）
pub async fn add_sub_notice(
    State(state): State<Arc<AppState>>,
    Path(notice_id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<SubNotice> {
    let mut form = NoticeForm::read(multipart).await?;
    let command = AddSubNotice {
        notice_id,
        title: form.title()?,
        file: form.file,
        url: form.url,
        upload: form.upload,
    };

    let sub_notice = state.notice_commands.add_sub_notice(command).await?;
    Ok(Json(ApiResponse::success(sub_notice)))
}

pub async fn remove_sub_notice(
    State(state): State<Arc<AppState>>,
    Path((notice_id, sub_notice_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Empty> {
    state
        .notice_commands
        .remove_sub_notice(RemoveSubNotice {
            notice_id,
            sub_notice_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_title_date_and_type() {
        let form = NoticeForm {
            published_on: Some("2024-03-01".to_string()),
            kind: Some("url".to_string()),
            ..Default::default()
        };
        assert!(matches!(form.into_input(), Err(ApiError::BadRequest(_))));

        let form = NoticeForm {
            title: Some("Tender notice".to_string()),
            published_on: Some("01/03/2024".to_string()),
            kind: Some("url".to_string()),
            ..Default::default()
        };
        assert!(matches!(form.into_input(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_form_into_input() {
        let form = NoticeForm {
            title: Some("Tender notice".to_string()),
            published_on: Some("2024-03-01".to_string()),
            kind: Some("url".to_string()),
            url: Some("https://example.org/tender".to_string()),
            ..Default::default()
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.kind, "url");
        assert_eq!(input.published_on, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(input.upload.is_none());
    }
}
