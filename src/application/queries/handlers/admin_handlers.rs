//! Admin Query Handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::AdminRepositoryPort;
use crate::application::queries::{GetAdmin, ListAdmins};
use crate::domain::identity::AdminUser;

/// 管理员视图（不含密码哈希）
#[derive(Debug, Clone, Serialize)]
pub struct AdminView {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<AdminUser> for AdminView {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            username: admin.username.as_str().to_string(),
            created_at: admin.created_at,
            last_login_at: admin.last_login_at,
        }
    }
}

/// 管理员查询处理器
pub struct AdminQueryHandler {
    admin_repo: Arc<dyn AdminRepositoryPort>,
}

impl AdminQueryHandler {
    pub fn new(admin_repo: Arc<dyn AdminRepositoryPort>) -> Self {
        Self { admin_repo }
    }

    pub async fn get(&self, query: GetAdmin) -> Result<AdminView, ApplicationError> {
        self.admin_repo
            .find_by_id(query.admin_id)
            .await?
            .map(AdminView::from)
            .ok_or_else(|| ApplicationError::not_found("Admin", query.admin_id))
    }

    pub async fn list(&self, _query: ListAdmins) -> Result<Vec<AdminView>, ApplicationError> {
        let admins = self.admin_repo.find_all().await?;
        Ok(admins.into_iter().map(AdminView::from).collect())
    }
}
