//! Notice Context - Errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoticeError {
    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("未知的公告类型: {0}")]
    UnknownKind(String),

    #[error("公告类型 {kind} 缺少必填字段 {field}")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("公告类型 {kind} 不接受字段 {field}")]
    UnexpectedField { kind: &'static str, field: &'static str },

    #[error("无效的链接: {0}")]
    InvalidUrl(String),

    #[error("无效的文档: {0}")]
    InvalidDocument(String),

    #[error("公告不包含子公告: {0}")]
    NotASubNoticeContainer(Uuid),

    #[error("子公告不存在: {0}")]
    SubNoticeNotFound(Uuid),
}
