//! File Storage Port - 出站端口
//!
//! 定义上传文件（图片、PDF）的存储抽象

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 文件存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes, limit {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("File content does not match extension: {0}")]
    ContentMismatch(String),

    #[error("Path outside upload directory: {0}")]
    OutsideRoot(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 上传文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    /// 根据扩展名判断类别
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => Some(Self::Image),
            "pdf" => Some(Self::Document),
            _ => None,
        }
    }

    /// 存储子目录
    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Document => "documents",
        }
    }
}

/// 根据扩展名推断 Content-Type
pub fn content_type_for(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// 已保存的文件
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub kind: UploadKind,
    /// 存储文件名（uuid.ext）
    pub file_name: String,
    /// 原始文件名
    pub original_name: String,
    /// 公开访问路径，如 `/uploads/documents/xxx.pdf`
    pub url: String,
    pub size: u64,
    pub content_type: &'static str,
}

/// File Storage Port - 出站端口
#[async_trait]
pub trait FileStoragePort: Send + Sync {
    /// 保存上传文件，按扩展名分类并校验大小与内容
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredFile, StorageError>;

    /// 按公开路径删除文件，文件不存在时返回 false
    async fn delete(&self, url: &str) -> Result<bool, StorageError>;

    /// 公开路径对应的文件是否存在
    async fn exists(&self, url: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_kind_from_extension() {
        assert_eq!(UploadKind::from_extension("PDF"), Some(UploadKind::Document));
        assert_eq!(UploadKind::from_extension("jpeg"), Some(UploadKind::Image));
        assert_eq!(UploadKind::from_extension("exe"), None);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("pdf"), "application/pdf");
        assert_eq!(content_type_for("JPG"), "image/jpeg");
        assert_eq!(content_type_for("bin"), "application/octet-stream");
    }
}
