//! News Commands

use chrono::NaiveDate;
use uuid::Uuid;

/// 新闻输入
#[derive(Debug, Clone)]
pub struct NewsInput {
    pub title: String,
    pub slug: Option<String>,
    pub summary: String,
    pub body_html: String,
    pub cover_image: Option<String>,
    pub gallery: Vec<String>,
    pub published_on: NaiveDate,
    pub published: bool,
}

/// 创建新闻命令
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub input: NewsInput,
}

/// 更新新闻命令
#[derive(Debug, Clone)]
pub struct UpdateNews {
    pub news_id: Uuid,
    pub input: NewsInput,
}

/// 删除新闻命令
#[derive(Debug, Clone)]
pub struct DeleteNews {
    pub news_id: Uuid,
}
