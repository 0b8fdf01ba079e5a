//! Upload HTTP Handler - 编辑器图片、新闻封面、PDF

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::commands::StoreUpload;
use crate::application::StoredFile;
use crate::infrastructure::http::dto::{file_field, multipart_error, ApiResponse, ApiResult};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 上传单个文件（字段名 `file`），返回公开 URL
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<StoredFile> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            upload = file_field(field).await?;
            break;
        }
    }

    let upload = upload.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;
    let stored = state.upload_commands.store(StoreUpload { upload }).await?;

    Ok(Json(ApiResponse::success(stored)))
}
