//! Notice Commands

use chrono::NaiveDate;
use uuid::Uuid;

use super::Upload;

/// 公告输入
///
/// `upload` 优先于 `file`；`file` 可引用已上传的 PDF
#[derive(Debug, Clone)]
pub struct NoticeInput {
    pub title: String,
    pub published_on: NaiveDate,
    /// document | url | subNotices
    pub kind: String,
    pub file: Option<String>,
    pub url: Option<String>,
    pub upload: Option<Upload>,
}

/// 创建公告命令
#[derive(Debug, Clone)]
pub struct CreateNotice {
    pub input: NoticeInput,
}

/// 更新公告命令
#[derive(Debug, Clone)]
pub struct UpdateNotice {
    pub notice_id: Uuid,
    pub input: NoticeInput,
}

/// 删除公告命令（同时删除其上传文档）
#[derive(Debug, Clone)]
pub struct DeleteNotice {
    pub notice_id: Uuid,
}

/// 添加子公告命令
#[derive(Debug, Clone)]
pub struct AddSubNotice {
    pub notice_id: Uuid,
    pub title: String,
    pub file: Option<String>,
    pub url: Option<String>,
    pub upload: Option<Upload>,
}

/// 移除子公告命令
#[derive(Debug, Clone)]
pub struct RemoveSubNotice {
    pub notice_id: Uuid,
    pub sub_notice_id: Uuid,
}
