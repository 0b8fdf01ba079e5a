//! Content Queries - 页面、新闻、首页

use uuid::Uuid;

use crate::application::ports::Paging;

/// 按 ID 获取页面（后台）
#[derive(Debug, Clone)]
pub struct GetPage {
    pub page_id: Uuid,
}

/// 按 slug 获取已发布页面（前台）
#[derive(Debug, Clone)]
pub struct GetPublishedPage {
    pub slug: String,
}

/// 页面列表
#[derive(Debug, Clone)]
pub struct ListPages {
    pub published_only: bool,
}

/// 获取新闻详情
#[derive(Debug, Clone)]
pub struct GetNews {
    pub news_id: Uuid,
    /// 前台只能看到已发布的新闻
    pub published_only: bool,
}

/// 新闻分页列表
#[derive(Debug, Clone)]
pub struct ListNews {
    pub published_only: bool,
    pub paging: Paging,
}

/// 首页数据：最新新闻与公告
#[derive(Debug, Clone)]
pub struct GetHome {
    pub news_limit: u32,
    pub notice_limit: u32,
}

impl Default for GetHome {
    fn default() -> Self {
        Self {
            news_limit: 3,
            notice_limit: 5,
        }
    }
}
