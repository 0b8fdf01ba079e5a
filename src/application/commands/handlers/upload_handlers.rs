//! Upload Command Handlers

use std::sync::Arc;

use crate::application::commands::StoreUpload;
use crate::application::error::ApplicationError;
use crate::application::ports::{FileStoragePort, StoredFile};

/// 通用上传处理器（编辑器图片、新闻封面、PDF）
pub struct UploadCommandHandler {
    file_storage: Arc<dyn FileStoragePort>,
}

impl UploadCommandHandler {
    pub fn new(file_storage: Arc<dyn FileStoragePort>) -> Self {
        Self { file_storage }
    }

    pub async fn store(&self, command: StoreUpload) -> Result<StoredFile, ApplicationError> {
        let upload = command.upload;
        if upload.data.is_empty() {
            return Err(ApplicationError::validation("Uploaded file is empty"));
        }

        let stored = self.file_storage.save(&upload.file_name, &upload.data).await?;

        tracing::info!(
            file = %stored.url,
            original_name = %stored.original_name,
            size = stored.size,
            "File uploaded"
        );

        Ok(stored)
    }
}
