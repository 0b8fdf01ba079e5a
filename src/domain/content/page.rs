//! Content Context - Page

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Slug, Title};

/// 页面草稿（创建和更新共用）
#[derive(Debug, Clone)]
pub struct PageDraft {
    pub slug: Slug,
    pub title: Title,
    pub content_html: String,
    /// 页面构建器输出，原样保存
    pub builder_data: Option<serde_json::Value>,
    pub published: bool,
}

/// 页面聚合根
///
/// 不变量:
/// - slug 在所有页面中唯一（由仓储保证）
/// - 仅已发布页面对公众可见
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub slug: Slug,
    pub title: Title,
    pub content_html: String,
    pub builder_data: Option<serde_json::Value>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(draft: PageDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: draft.slug,
            title: draft.title,
            content_html: draft.content_html,
            builder_data: draft.builder_data,
            published: draft.published,
            created_at: now,
            updated_at: now,
        }
    }

    /// 用草稿覆盖可编辑字段
    pub fn apply(&mut self, draft: PageDraft) {
        self.slug = draft.slug;
        self.title = draft.title;
        self.content_html = draft.content_html;
        self.builder_data = draft.builder_data;
        self.published = draft.published;
        self.updated_at = Utc::now();
    }

    pub fn is_visible(&self) -> bool {
        self.published
    }
}
