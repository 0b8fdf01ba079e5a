//! Page Commands

use uuid::Uuid;

/// 页面输入（创建与更新共用）
#[derive(Debug, Clone)]
pub struct PageInput {
    pub slug: String,
    pub title: String,
    pub content_html: String,
    pub builder_data: Option<serde_json::Value>,
    pub published: bool,
}

/// 创建页面命令
#[derive(Debug, Clone)]
pub struct CreatePage {
    pub input: PageInput,
}

/// 更新页面命令
#[derive(Debug, Clone)]
pub struct UpdatePage {
    pub page_id: Uuid,
    pub input: PageInput,
}

/// 删除页面命令
#[derive(Debug, Clone)]
pub struct DeletePage {
    pub page_id: Uuid,
}
