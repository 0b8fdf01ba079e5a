//! Content Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("无效的 slug: {0}")]
    InvalidSlug(String),

    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的摘要: {0}")]
    InvalidSummary(String),

    #[error("图集图片过多: {0}")]
    TooManyImages(usize),

    #[error("无效的图片地址: {0}")]
    InvalidImage(String),
}
