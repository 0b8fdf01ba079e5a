//! Notice Command Handlers
//!
//! 公告写操作。附件 PDF 可随请求上传，也可引用已上传文件；
//! 公告更新或删除后不再被任何公告引用的 PDF 会从存储中移除。
//! 同一公告的写操作按公告串行执行。

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::commands::{
    AddSubNotice, CreateNotice, DeleteNotice, NoticeInput, RemoveSubNotice, UpdateNotice, Upload,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{FileStoragePort, NoticeRepositoryPort, UploadKind};
use crate::domain::notice::{Notice, NoticeDraft, NoticeLink, SubNotice};

/// Notice 命令处理器
pub struct NoticeCommandHandler {
    notice_repo: Arc<dyn NoticeRepositoryPort>,
    file_storage: Arc<dyn FileStoragePort>,
    /// 每条公告一把写锁
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

/// 附件来源：本次上传的新文件需要在失败时回收
enum Attachment {
    None,
    Existing(String),
    Uploaded(String),
}

impl Attachment {
    fn file(&self) -> Option<String> {
        match self {
            Attachment::None => None,
            Attachment::Existing(url) | Attachment::Uploaded(url) => Some(url.clone()),
        }
    }
}

impl NoticeCommandHandler {
    pub fn new(
        notice_repo: Arc<dyn NoticeRepositoryPort>,
        file_storage: Arc<dyn FileStoragePort>,
    ) -> Self {
        Self {
            notice_repo,
            file_storage,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, notice_id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(notice_id).or_default().clone()
    }

    pub async fn create(&self, command: CreateNotice) -> Result<Notice, ApplicationError> {
        let NoticeInput {
            title,
            published_on,
            kind,
            file,
            url,
            upload,
        } = command.input;

        let attachment = self.resolve_attachment(file, upload).await?;
        let draft = match NoticeDraft::new(&title, published_on, &kind, attachment.file(), url) {
            Ok(draft) => draft,
            Err(e) => {
                self.discard(&attachment).await;
                return Err(e.into());
            }
        };

        let notice = Notice::new(draft);
        if let Err(e) = self.notice_repo.save(&notice).await {
            self.discard(&attachment).await;
            return Err(e.into());
        }

        tracing::info!(
            notice_id = %notice.id,
            kind = notice.body.kind().as_str(),
            "Notice created"
        );

        Ok(notice)
    }

    pub async fn update(&self, command: UpdateNotice) -> Result<Notice, ApplicationError> {
        let lock = self.lock_for(command.notice_id);
        let _guard = lock.lock().await;

        let mut notice = self
            .notice_repo
            .find_by_id(command.notice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Notice", command.notice_id))?;

        let NoticeInput {
            title,
            published_on,
            kind,
            file,
            url,
            upload,
        } = command.input;

        let attachment = self.resolve_attachment(file, upload).await?;
        let draft = match NoticeDraft::new(&title, published_on, &kind, attachment.file(), url) {
            Ok(draft) => draft,
            Err(e) => {
                self.discard(&attachment).await;
                return Err(e.into());
            }
        };

        let orphaned = notice.apply(draft);
        if let Err(e) = self.notice_repo.save(&notice).await {
            self.discard(&attachment).await;
            return Err(e.into());
        }

        self.remove_files(&orphaned).await;

        tracing::info!(
            notice_id = %notice.id,
            kind = notice.body.kind().as_str(),
            removed_files = orphaned.len(),
            "Notice updated"
        );

        Ok(notice)
    }

    pub async fn delete(&self, command: DeleteNotice) -> Result<(), ApplicationError> {
        let lock = self.lock_for(command.notice_id);
        let _guard = lock.lock().await;

        let notice = self
            .notice_repo
            .find_by_id(command.notice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Notice", command.notice_id))?;

        self.notice_repo.delete(notice.id).await?;
        self.locks.remove(&notice.id);

        let documents = notice.documents();
        self.remove_files(&documents).await;

        tracing::info!(
            notice_id = %notice.id,
            removed_files = documents.len(),
            "Notice deleted"
        );

        Ok(())
    }

    pub async fn add_sub_notice(&self, command: AddSubNotice) -> Result<SubNotice, ApplicationError> {
        let lock = self.lock_for(command.notice_id);
        let _guard = lock.lock().await;

        let mut notice = self
            .notice_repo
            .find_by_id(command.notice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Notice", command.notice_id))?;

        let attachment = self.resolve_attachment(command.file, command.upload).await?;
        let sub_notice = match NoticeLink::from_parts(attachment.file(), command.url)
            .and_then(|link| SubNotice::new(&command.title, link))
            .and_then(|sub| notice.add_sub_notice(sub.clone()).map(|_| sub))
        {
            Ok(sub) => sub,
            Err(e) => {
                self.discard(&attachment).await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.notice_repo.save(&notice).await {
            self.discard(&attachment).await;
            return Err(e.into());
        }

        tracing::info!(
            notice_id = %notice.id,
            sub_notice_id = %sub_notice.id,
            "Sub-notice added"
        );

        Ok(sub_notice)
    }

    pub async fn remove_sub_notice(&self, command: RemoveSubNotice) -> Result<(), ApplicationError> {
        let lock = self.lock_for(command.notice_id);
        let _guard = lock.lock().await;

        let mut notice = self
            .notice_repo
            .find_by_id(command.notice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Notice", command.notice_id))?;

        let removed = notice.remove_sub_notice(command.sub_notice_id)?;
        self.notice_repo.save(&notice).await?;

        if let Some(file) = removed.link.document() {
            self.remove_files(&[file.to_string()]).await;
        }

        tracing::info!(
            notice_id = %notice.id,
            sub_notice_id = %removed.id,
            "Sub-notice removed"
        );

        Ok(())
    }

    /// 上传优先于引用；引用的文件必须已存在
    async fn resolve_attachment(
        &self,
        file: Option<String>,
        upload: Option<Upload>,
    ) -> Result<Attachment, ApplicationError> {
        if let Some(upload) = upload {
            let is_pdf = Path::new(&upload.file_name)
                .extension()
                .and_then(|e| e.to_str())
                .and_then(UploadKind::from_extension)
                == Some(UploadKind::Document);
            if !is_pdf {
                return Err(ApplicationError::validation(format!(
                    "Notice attachment must be a PDF: {}",
                    upload.file_name
                )));
            }
            let stored = self.file_storage.save(&upload.file_name, &upload.data).await?;
            return Ok(Attachment::Uploaded(stored.url));
        }

        match file.map(|f| f.trim().to_string()).filter(|f| !f.is_empty()) {
            Some(url) => {
                if !self.file_storage.exists(&url).await {
                    return Err(ApplicationError::validation(format!(
                        "Referenced document does not exist: {}",
                        url
                    )));
                }
                Ok(Attachment::Existing(url))
            }
            None => Ok(Attachment::None),
        }
    }

    async fn discard(&self, attachment: &Attachment) {
        if let Attachment::Uploaded(url) = attachment {
            self.remove_files(&[url.clone()]).await;
        }
    }

    /// 仅删除已无公告引用的文件，引用情况无法确认时保留
    async fn remove_files(&self, urls: &[String]) {
        for url in urls {
            match self.notice_repo.document_in_use(url).await {
                Ok(false) => {}
                Ok(true) => {
                    tracing::debug!(file = %url, "Notice document still referenced, keeping");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(file = %url, error = %e, "Failed to check notice document references");
                    continue;
                }
            }
            match self.file_storage.delete(url).await {
                Ok(true) => tracing::debug!(file = %url, "Removed notice document"),
                Ok(false) => tracing::debug!(file = %url, "Notice document already gone"),
                Err(e) => tracing::warn!(file = %url, error = %e, "Failed to remove notice document"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{Fixture, PDF_BYTES};
    use crate::domain::notice::NoticeBody;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn pdf_upload(name: &str) -> Upload {
        Upload {
            file_name: name.to_string(),
            data: PDF_BYTES.to_vec(),
        }
    }

    fn input(kind: &str) -> NoticeInput {
        NoticeInput {
            title: "Invitation for bids".to_string(),
            published_on: date(),
            kind: kind.to_string(),
            file: None,
            url: None,
            upload: None,
        }
    }

    fn handler(fx: &Fixture) -> NoticeCommandHandler {
        NoticeCommandHandler::new(fx.notice_repo.clone(), fx.file_storage.clone())
    }

    #[tokio::test]
    async fn test_create_document_notice_with_upload() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut input = input("document");
        input.upload = Some(pdf_upload("bid.pdf"));
        let notice = handler.create(CreateNotice { input }).await.unwrap();

        let file = match &notice.body {
            NoticeBody::Document { file } => file.clone(),
            other => panic!("unexpected body: {:?}", other),
        };
        assert!(file.starts_with("/uploads/documents/"));
        assert!(fx.file_storage.exists(&file).await);
    }

    #[tokio::test]
    async fn test_upload_must_be_pdf() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut input = input("document");
        input.upload = Some(Upload {
            file_name: "photo.png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
        });
        let err = handler.create(CreateNotice { input }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_invalid_draft_discards_uploaded_file() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut input = input("url");
        input.upload = Some(pdf_upload("bid.pdf"));
        let err = handler.create(CreateNotice { input }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(fx.stored_file_count("documents"), 0);
    }

    #[tokio::test]
    async fn test_referenced_document_must_exist() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut input = input("document");
        input.file = Some("/uploads/documents/missing.pdf".to_string());
        let err = handler.create(CreateNotice { input }).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_to_url_removes_old_document() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut create = input("document");
        create.upload = Some(pdf_upload("bid.pdf"));
        let notice = handler.create(CreateNotice { input: create }).await.unwrap();
        let old_file = notice.documents().remove(0);

        let mut update = input("url");
        update.url = Some("https://example.org/bids".to_string());
        let updated = handler
            .update(UpdateNotice {
                notice_id: notice.id,
                input: update,
            })
            .await
            .unwrap();

        assert!(matches!(updated.body, NoticeBody::Url { .. }));
        assert!(!fx.file_storage.exists(&old_file).await);
    }

    #[tokio::test]
    async fn test_sub_notice_lifecycle() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let notice = handler
            .create(CreateNotice {
                input: input("subNotices"),
            })
            .await
            .unwrap();

        let sub = handler
            .add_sub_notice(AddSubNotice {
                notice_id: notice.id,
                title: "Addendum 1".to_string(),
                file: None,
                url: None,
                upload: Some(pdf_upload("addendum.pdf")),
            })
            .await
            .unwrap();
        let file = sub.link.document().unwrap().to_string();
        assert!(fx.file_storage.exists(&file).await);

        handler
            .add_sub_notice(AddSubNotice {
                notice_id: notice.id,
                title: "Pre-bid minutes".to_string(),
                file: None,
                url: Some("https://example.org/minutes".to_string()),
                upload: None,
            })
            .await
            .unwrap();

        handler
            .remove_sub_notice(RemoveSubNotice {
                notice_id: notice.id,
                sub_notice_id: sub.id,
            })
            .await
            .unwrap();
        assert!(!fx.file_storage.exists(&file).await);

        let stored = fx.notice_repo.find_by_id(notice.id).await.unwrap().unwrap();
        match stored.body {
            NoticeBody::SubNotices { items } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].title, "Pre-bid minutes");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sub_notice_on_url_notice_is_rejected() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut create = input("url");
        create.url = Some("https://example.org/a".to_string());
        let notice = handler.create(CreateNotice { input: create }).await.unwrap();

        let err = handler
            .add_sub_notice(AddSubNotice {
                notice_id: notice.id,
                title: "Annex".to_string(),
                file: None,
                url: None,
                upload: Some(pdf_upload("annex.pdf")),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
        assert_eq!(fx.stored_file_count("documents"), 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_sub_notice() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let notice = handler
            .create(CreateNotice {
                input: input("subNotices"),
            })
            .await
            .unwrap();
        let err = handler
            .remove_sub_notice(RemoveSubNotice {
                notice_id: notice.id,
                sub_notice_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_documents() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut create = input("document");
        create.upload = Some(pdf_upload("bid.pdf"));
        let notice = handler.create(CreateNotice { input: create }).await.unwrap();

        handler
            .delete(DeleteNotice {
                notice_id: notice.id,
            })
            .await
            .unwrap();

        assert!(fx.notice_repo.find_by_id(notice.id).await.unwrap().is_none());
        assert_eq!(fx.stored_file_count("documents"), 0);
    }

    #[tokio::test]
    async fn test_shared_document_survives_delete() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut first = input("document");
        first.upload = Some(pdf_upload("bid.pdf"));
        let owner = handler.create(CreateNotice { input: first }).await.unwrap();
        let file = owner.documents().remove(0);

        let mut second = input("document");
        second.file = Some(file.clone());
        let borrower = handler.create(CreateNotice { input: second }).await.unwrap();

        handler
            .delete(DeleteNotice {
                notice_id: owner.id,
            })
            .await
            .unwrap();
        assert!(fx.file_storage.exists(&file).await);
        assert_eq!(fx.stored_file_count("documents"), 1);

        handler
            .delete(DeleteNotice {
                notice_id: borrower.id,
            })
            .await
            .unwrap();
        assert!(!fx.file_storage.exists(&file).await);
    }

    #[tokio::test]
    async fn test_shared_document_survives_sub_notice_removal() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let mut first = input("document");
        first.upload = Some(pdf_upload("bid.pdf"));
        let owner = handler.create(CreateNotice { input: first }).await.unwrap();
        let file = owner.documents().remove(0);

        let group = handler
            .create(CreateNotice {
                input: input("subNotices"),
            })
            .await
            .unwrap();
        let sub = handler
            .add_sub_notice(AddSubNotice {
                notice_id: group.id,
                title: "Bid document".to_string(),
                file: Some(file.clone()),
                url: None,
                upload: None,
            })
            .await
            .unwrap();

        handler
            .remove_sub_notice(RemoveSubNotice {
                notice_id: group.id,
                sub_notice_id: sub.id,
            })
            .await
            .unwrap();
        assert!(fx.file_storage.exists(&file).await);

        // 改为链接后该文档不再被引用
        let mut update = input("url");
        update.url = Some("https://example.org/bids".to_string());
        handler
            .update(UpdateNotice {
                notice_id: owner.id,
                input: update,
            })
            .await
            .unwrap();
        assert!(!fx.file_storage.exists(&file).await);
    }

    #[tokio::test]
    async fn test_concurrent_sub_notice_adds_are_kept() {
        let fx = Fixture::new().await;
        let handler = handler(&fx);

        let notice = handler
            .create(CreateNotice {
                input: input("subNotices"),
            })
            .await
            .unwrap();

        let add = |title: &str| AddSubNotice {
            notice_id: notice.id,
            title: title.to_string(),
            file: None,
            url: Some(format!("https://example.org/{}", title.len())),
            upload: None,
        };
        let (first, second) = tokio::join!(
            handler.add_sub_notice(add("Addendum 1")),
            handler.add_sub_notice(add("Pre-bid meeting minutes")),
        );
        first.unwrap();
        second.unwrap();

        let stored = fx.notice_repo.find_by_id(notice.id).await.unwrap().unwrap();
        match stored.body {
            NoticeBody::SubNotices { items } => assert_eq!(items.len(), 2),
            other => panic!("unexpected body: {:?}", other),
        }
    }
}
