//! File Storage - 本地文件系统上传存储
//!
//! 实现 FileStoragePort trait，文件布局:
//! `<uploads_dir>/{images|documents}/<uuid>.<ext>`

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{
    content_type_for, FileStoragePort, StorageError, StoredFile, UploadKind,
};

/// 本地上传文件存储
pub struct LocalFileStorage {
    /// 存储根目录
    base_dir: PathBuf,
    /// 公开访问前缀，如 `/uploads`
    public_path: String,
    /// 单文件大小上限（字节）
    max_size: u64,
}

impl LocalFileStorage {
    /// 创建存储并确保子目录存在
    pub async fn new(
        base_dir: impl AsRef<Path>,
        public_path: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        for kind in [UploadKind::Image, UploadKind::Document] {
            fs::create_dir_all(base_dir.join(kind.dir_name()))
                .await
                .map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        Ok(Self {
            base_dir,
            public_path: format!("/{}", public_path.trim_matches('/')),
            max_size,
        })
    }

    /// 公开路径映射为磁盘路径，只接受 `<public>/<images|documents>/<file>`
    fn resolve(&self, url: &str) -> Result<PathBuf, StorageError> {
        let outside = || StorageError::OutsideRoot(url.to_string());

        let relative = url
            .strip_prefix(&self.public_path)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(outside)?;
        let (dir, name) = relative.split_once('/').ok_or_else(outside)?;

        if dir != UploadKind::Image.dir_name() && dir != UploadKind::Document.dir_name() {
            return Err(outside());
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_dir.join(dir).join(name)),
            _ => Err(outside()),
        }
    }
}

/// 根据文件头校验内容与扩展名是否一致（svg 为文本格式，不做校验）
fn sniff_matches(ext: &str, data: &[u8]) -> bool {
    match ext {
        "pdf" => data.starts_with(b"%PDF-"),
        "png" => data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        _ => true,
    }
}

#[async_trait]
impl FileStoragePort for LocalFileStorage {
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredFile, StorageError> {
        let original_name = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let ext = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let kind = UploadKind::from_extension(&ext)
            .ok_or_else(|| StorageError::UnsupportedType(original_name.clone()))?;

        let size = data.len() as u64;
        if size > self.max_size {
            return Err(StorageError::TooLarge {
                size,
                limit: self.max_size,
            });
        }
        if !sniff_matches(&ext, data) {
            return Err(StorageError::ContentMismatch(original_name));
        }

        let file_name = format!("{}.{}", Uuid::new_v4().simple(), ext);
        let path = self.base_dir.join(kind.dir_name()).join(&file_name);

        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(path = %path.display(), size = size, "Saved upload");

        Ok(StoredFile {
            kind,
            url: format!("{}/{}/{}", self.public_path, kind.dir_name(), file_name),
            file_name,
            original_name,
            size,
            content_type: content_type_for(&ext),
        })
    }

    async fn delete(&self, url: &str) -> Result<bool, StorageError> {
        let path = self.resolve(url)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted upload");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(e.to_string())),
        }
    }

    async fn exists(&self, url: &str) -> bool {
        match self.resolve(url) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PDF: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";

    #[tokio::test]
    async fn test_save_exists_delete() {
        let temp_dir = tempdir().unwrap();
        let storage = LocalFileStorage::new(temp_dir.path(), "/uploads/", 1024).await.unwrap();

        let stored = storage.save("Annual Report.PDF", PDF).await.unwrap();
        assert_eq!(stored.kind, UploadKind::Document);
        assert!(stored.url.starts_with("/uploads/documents/"));
        assert!(stored.file_name.ends_with(".pdf"));
        assert_eq!(stored.size, PDF.len() as u64);

        assert!(storage.exists(&stored.url).await);
        assert!(temp_dir.path().join("documents").join(&stored.file_name).exists());

        assert!(storage.delete(&stored.url).await.unwrap());
        assert!(!storage.exists(&stored.url).await);
        assert!(!storage.delete(&stored.url).await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_large_unknown_and_mismatched() {
        let temp_dir = tempdir().unwrap();
        let storage = LocalFileStorage::new(temp_dir.path(), "/uploads", 16).await.unwrap();

        assert!(matches!(
            storage.save("big.pdf", &[b'%'; 64]).await.unwrap_err(),
            StorageError::TooLarge { size: 64, limit: 16 }
        ));
        assert!(matches!(
            storage.save("script.sh", b"#!/bin/sh").await.unwrap_err(),
            StorageError::UnsupportedType(_)
        ));
        assert!(matches!(
            storage.save("photo.png", b"%PDF-1.4").await.unwrap_err(),
            StorageError::ContentMismatch(_)
        ));
    }

    #[tokio::test]
    async fn test_original_name_directories_are_stripped() {
        let temp_dir = tempdir().unwrap();
        let storage = LocalFileStorage::new(temp_dir.path(), "/uploads", 1024).await.unwrap();

        let stored = storage.save("../../etc/report.pdf", PDF).await.unwrap();
        assert_eq!(stored.original_name, "report.pdf");
        assert!(stored.url.starts_with("/uploads/documents/"));
    }

    #[tokio::test]
    async fn test_delete_refuses_paths_outside_root() {
        let temp_dir = tempdir().unwrap();
        let storage = LocalFileStorage::new(temp_dir.path(), "/uploads", 1024).await.unwrap();

        for url in [
            "/uploads/documents/../../secret.pdf",
            "/uploads/other/file.pdf",
            "/static/documents/a.pdf",
            "/uploads/documents/",
            "/uploads/documents/a/b.pdf",
        ] {
            assert!(
                matches!(storage.delete(url).await, Err(StorageError::OutsideRoot(_))),
                "{} should be refused",
                url
            );
        }
    }
}
