//! Data Transfer Objects
//!
//! 统一响应结构与通用请求参数

use async_trait::async_trait;
use axum::{
    extract::{
        multipart::{Field, MultipartError},
        rejection::JsonRejection,
        FromRequest, Request,
    },
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::application::commands::Upload;
use crate::application::Paging;

use super::error::ApiError;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

/// 处理器返回类型
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// ============================================================================
// 请求提取
// ============================================================================

/// JSON 请求体，解析失败时返回统一错误格式
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// 分页查询参数 `?page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct PagingParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PagingParams> for Paging {
    fn from(params: PagingParams) -> Self {
        Paging::new(params.page, params.limit)
    }
}

// ============================================================================
// Multipart
// ============================================================================

pub fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

/// 读取文本字段，空白视为未填写
pub async fn text_field(field: Field<'_>) -> Result<Option<String>, ApiError> {
    let value = field.text().await.map_err(multipart_error)?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// 读取文件字段；未选择文件时浏览器会提交空文件名
pub async fn file_field(field: Field<'_>) -> Result<Option<Upload>, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let data = field.bytes().await.map_err(multipart_error)?;
    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload {
        file_name,
        data: data.to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let value = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(value["errno"], 0);
        assert_eq!(value["error"], "");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_paging_params_are_normalized() {
        let paging: Paging = PagingParams {
            page: Some(0),
            limit: Some(1000),
        }
        .into();
        assert_eq!(paging.page, 1);
        assert_eq!(paging.limit, 100);
    }
}
