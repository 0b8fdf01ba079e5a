//! Notice Context - Aggregate Root

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NoticeBody, NoticeError, NoticeKind, NoticeLink};
use crate::domain::content::Title;

/// 子公告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubNotice {
    pub id: Uuid,
    pub title: String,
    #[serde(flatten)]
    pub link: NoticeLink,
}

impl SubNotice {
    pub fn new(title: &str, link: NoticeLink) -> Result<Self, NoticeError> {
        let title = Title::new(title).map_err(|e| NoticeError::InvalidTitle(e.to_string()))?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.into(),
            link,
        })
    }
}

/// 公告草稿（已通过条件必填校验）
#[derive(Debug, Clone)]
pub struct NoticeDraft {
    pub title: Title,
    pub published_on: NaiveDate,
    pub body: NoticeBody,
}

impl NoticeDraft {
    pub fn new(
        title: &str,
        published_on: NaiveDate,
        kind: &str,
        file: Option<String>,
        url: Option<String>,
    ) -> Result<Self, NoticeError> {
        let title = Title::new(title).map_err(|e| NoticeError::InvalidTitle(e.to_string()))?;
        let kind = NoticeKind::parse(kind)?;
        let body = NoticeBody::from_parts(kind, file, url)?;
        Ok(Self {
            title,
            published_on,
            body,
        })
    }
}

/// Notice 聚合根
///
/// 不变量:
/// - 正文类型与字段一一对应（document↔file, url↔url, subNotices↔items）
/// - 子公告只能挂在 subNotices 类型的公告下
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub title: Title,
    pub published_on: NaiveDate,
    pub body: NoticeBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(draft: NoticeDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            published_on: draft.published_on,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// 应用草稿，返回不再被引用的文档路径
    ///
    /// 若新旧类型都是 subNotices，已有子公告保留
    pub fn apply(&mut self, draft: NoticeDraft) -> Vec<String> {
        let before = self.documents();

        self.title = draft.title;
        self.published_on = draft.published_on;
        let keep_items = matches!(
            (&self.body, &draft.body),
            (NoticeBody::SubNotices { .. }, NoticeBody::SubNotices { .. })
        );
        if !keep_items {
            self.body = draft.body;
        }
        self.updated_at = Utc::now();

        let after = self.documents();
        before.into_iter().filter(|d| !after.contains(d)).collect()
    }

    /// 添加子公告
    pub fn add_sub_notice(&mut self, sub_notice: SubNotice) -> Result<(), NoticeError> {
        match &mut self.body {
            NoticeBody::SubNotices { items } => {
                items.push(sub_notice);
                self.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(NoticeError::NotASubNoticeContainer(self.id)),
        }
    }

    /// 移除子公告并返回被移除的条目
    pub fn remove_sub_notice(&mut self, sub_notice_id: Uuid) -> Result<SubNotice, NoticeError> {
        let items = match &mut self.body {
            NoticeBody::SubNotices { items } => items,
            _ => return Err(NoticeError::NotASubNoticeContainer(self.id)),
        };
        let position = items
            .iter()
            .position(|s| s.id == sub_notice_id)
            .ok_or(NoticeError::SubNoticeNotFound(sub_notice_id))?;
        let removed = items.remove(position);
        self.updated_at = Utc::now();
        Ok(removed)
    }

    /// 公告引用的所有上传文档
    pub fn documents(&self) -> Vec<String> {
        match &self.body {
            NoticeBody::Document { file } => vec![file.clone()],
            NoticeBody::Url { .. } => Vec::new(),
            NoticeBody::SubNotices { items } => items
                .iter()
                .filter_map(|s| s.link.document().map(str::to_string))
                .collect(),
        }
    }
}
