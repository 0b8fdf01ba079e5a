//! Session Store Port - 管理员会话管理
//!
//! 定义登录会话的抽象接口，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Session Store 错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error("Session expired")]
    Expired,
}

/// 管理员会话
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    /// 不透明令牌，不写入日志
    #[serde(skip)]
    pub token: String,
    pub admin_id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session Store Port
///
/// 会话状态存储在内存中，进程重启后所有管理员需重新登录
pub trait SessionStorePort: Send + Sync {
    /// 创建会话并返回（包含新令牌）
    fn create(&self, admin_id: Uuid, username: &str) -> AdminSession;

    /// 校验令牌，有效时顺延过期时间
    fn authenticate(&self, token: &str) -> Result<AdminSession, SessionError>;

    /// 注销单个会话
    fn revoke(&self, token: &str) -> Result<(), SessionError>;

    /// 注销某管理员的全部会话（可保留一个），返回注销数量
    fn revoke_admin(&self, admin_id: Uuid, keep_token: Option<&str>) -> usize;

    /// 清理过期会话，返回清理数量
    fn purge_expired(&self) -> usize;

    /// 当前会话数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
