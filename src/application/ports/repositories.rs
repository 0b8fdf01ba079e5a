//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::content::{NewsItem, Page};
use crate::domain::identity::AdminUser;
use crate::domain::notice::Notice;
use crate::domain::procurement::{Contract, ContractKind, ContractStatus, Contractor, GoodsCategory};
use crate::domain::results::{Indicator, StatusUpdate};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// 分页
// ============================================================================

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 每页最大条数
pub const MAX_PAGE_SIZE: u32 = 100;

/// 分页参数（page 从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    /// 归一化：page 至少为 1，limit 限制在 1..=100
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, total: u64, paging: Paging) -> Self {
        Self {
            items,
            total,
            page: paging.page,
            limit: paging.limit,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Page Repository
// ============================================================================

/// Page Repository Port
#[async_trait]
pub trait PageRepositoryPort: Send + Sync {
    /// 保存页面（插入或更新），slug 冲突返回 Duplicate
    async fn save(&self, page: &Page) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Page>, RepositoryError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, RepositoryError>;

    /// 获取页面列表，按标题排序
    async fn find_all(&self, published_only: bool) -> Result<Vec<Page>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// News Repository
// ============================================================================

/// News Repository Port
#[async_trait]
pub trait NewsRepositoryPort: Send + Sync {
    /// 保存新闻，slug 冲突返回 Duplicate
    async fn save(&self, item: &NewsItem) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsItem>, RepositoryError>;

    /// 分页获取新闻，按发布日期倒序
    async fn find_page(
        &self,
        published_only: bool,
        paging: Paging,
    ) -> Result<Paged<NewsItem>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Notice Repository
// ============================================================================

/// Notice Repository Port
#[async_trait]
pub trait NoticeRepositoryPort: Send + Sync {
    async fn save(&self, notice: &Notice) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>, RepositoryError>;

    /// 分页获取公告，按发布日期倒序
    async fn find_page(&self, paging: Paging) -> Result<Paged<Notice>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// 是否仍有公告正文或子公告引用该文档
    async fn document_in_use(&self, file: &str) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Procurement Repositories
// ============================================================================

/// Contractor Repository Port
#[async_trait]
pub trait ContractorRepositoryPort: Send + Sync {
    /// 保存承包商，名称（不区分大小写）冲突返回 Duplicate
    async fn save(&self, contractor: &Contractor) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contractor>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Contractor>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Goods Category Repository Port
#[async_trait]
pub trait GoodsCategoryRepositoryPort: Send + Sync {
    async fn save(&self, category: &GoodsCategory) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GoodsCategory>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<GoodsCategory>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Contract Repository Port
#[async_trait]
pub trait ContractRepositoryPort: Send + Sync {
    /// 保存合同，同类型 package_no 冲突返回 Duplicate
    async fn save(&self, contract: &Contract) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, RepositoryError>;

    /// 按类型获取合同，可按状态过滤，按签约日期倒序
    async fn find_by_kind(
        &self,
        kind: ContractKind,
        status: Option<ContractStatus>,
    ) -> Result<Vec<Contract>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// 引用指定承包商的合同数量
    async fn count_by_contractor(&self, contractor_id: Uuid) -> Result<u64, RepositoryError>;

    /// 引用指定类别的合同数量
    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Indicator Repository
// ============================================================================

/// Indicator Repository Port
#[async_trait]
pub trait IndicatorRepositoryPort: Send + Sync {
    /// 保存指标，code 冲突返回 Duplicate
    async fn save(&self, indicator: &Indicator) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Indicator>, RepositoryError>;

    /// 获取全部指标，按 code 排序
    async fn find_all(&self) -> Result<Vec<Indicator>, RepositoryError>;

    /// 删除指标及其全部进度报告
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn save_update(&self, update: &StatusUpdate) -> Result<(), RepositoryError>;

    async fn find_update(&self, id: Uuid) -> Result<Option<StatusUpdate>, RepositoryError>;

    /// 获取指标的进度报告，按报告日期倒序
    async fn find_updates(&self, indicator_id: Uuid) -> Result<Vec<StatusUpdate>, RepositoryError>;

    /// 获取全部进度报告（用于列表页计算进度）
    async fn find_all_updates(&self) -> Result<Vec<StatusUpdate>, RepositoryError>;

    async fn delete_update(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Admin Repository
// ============================================================================

/// Admin Repository Port
#[async_trait]
pub trait AdminRepositoryPort: Send + Sync {
    /// 保存管理员，用户名冲突返回 Duplicate
    async fn save(&self, admin: &AdminUser) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<AdminUser>, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;

    /// 原子地删除管理员，仅剩一个管理员时不删除，返回是否删除
    async fn delete_unless_last(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// 记录最后登录时间
    async fn touch_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError>;
}
