//! Auth Command Handlers
//!
//! 管理员登录、注销、改密、账号管理

use std::sync::Arc;

use chrono::Utc;

use crate::application::commands::{
    BootstrapAdmin, ChangePassword, CreateAdmin, DeleteAdmin, Login, Logout,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{AdminRepositoryPort, AdminSession, SessionStorePort};
use crate::domain::identity::{AdminUser, Password, PasswordHash, Username};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// 认证命令处理器
pub struct AuthCommandHandler {
    admin_repo: Arc<dyn AdminRepositoryPort>,
    session_store: Arc<dyn SessionStorePort>,
    iterations: u32,
}

impl AuthCommandHandler {
    pub fn new(
        admin_repo: Arc<dyn AdminRepositoryPort>,
        session_store: Arc<dyn SessionStorePort>,
        iterations: u32,
    ) -> Self {
        Self {
            admin_repo,
            session_store,
            iterations,
        }
    }

    /// 登录成功返回新会话；失败时不区分用户名或密码错误
    pub async fn login(&self, command: Login) -> Result<AdminSession, ApplicationError> {
        let username = Username::new(&command.username)
            .map_err(|_| ApplicationError::unauthorized(INVALID_CREDENTIALS))?;

        let Some(admin) = self.admin_repo.find_by_username(username.as_str()).await? else {
            // 用户不存在时同样完成一次哈希计算
            verify_password(PasswordHash::placeholder(self.iterations), command.password).await?;
            tracing::warn!(username = %username, "Login failed: unknown user");
            return Err(ApplicationError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(admin.password_hash.clone(), command.password).await? {
            tracing::warn!(admin_id = %admin.id, "Login failed: wrong password");
            return Err(ApplicationError::unauthorized(INVALID_CREDENTIALS));
        }

        self.admin_repo.touch_login(admin.id, Utc::now()).await?;
        let session = self.session_store.create(admin.id, admin.username.as_str());

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin logged in");

        Ok(session)
    }

    /// 注销；令牌已失效时同样视为成功
    pub async fn logout(&self, command: Logout) {
        match self.session_store.revoke(&command.token) {
            Ok(()) => tracing::info!("Admin logged out"),
            Err(e) => tracing::debug!(error = %e, "Logout with inactive session"),
        }
    }

    /// 修改密码后注销该管理员的其他会话
    pub async fn change_password(&self, command: ChangePassword) -> Result<(), ApplicationError> {
        let mut admin = self
            .admin_repo
            .find_by_id(command.admin_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Admin", command.admin_id))?;

        if !verify_password(admin.password_hash.clone(), command.current_password).await? {
            return Err(ApplicationError::unauthorized("Current password is incorrect"));
        }

        let password = Password::new(command.new_password)?;
        admin.password_hash = hash_password(password, self.iterations).await?;
        self.admin_repo.save(&admin).await?;

        let revoked = self
            .session_store
            .revoke_admin(admin.id, Some(&command.token));

        tracing::info!(admin_id = %admin.id, revoked_sessions = revoked, "Admin password changed");

        Ok(())
    }

    pub async fn create_admin(&self, command: CreateAdmin) -> Result<AdminUser, ApplicationError> {
        let admin = self.new_admin(&command.username, command.password).await?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin created");

        Ok(admin)
    }

    /// 不能删除自己，也不能删除最后一个管理员
    pub async fn delete_admin(&self, command: DeleteAdmin) -> Result<(), ApplicationError> {
        if command.actor_id == command.admin_id {
            return Err(ApplicationError::business_rule("Admins cannot delete themselves"));
        }

        let admin = self
            .admin_repo
            .find_by_id(command.admin_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Admin", command.admin_id))?;

        if !self.admin_repo.delete_unless_last(admin.id).await? {
            return Err(ApplicationError::business_rule("Cannot delete the last admin"));
        }
        let revoked = self.session_store.revoke_admin(admin.id, None);

        tracing::info!(
            admin_id = %admin.id,
            actor_id = %command.actor_id,
            revoked_sessions = revoked,
            "Admin deleted"
        );

        Ok(())
    }

    /// 仅在没有任何管理员时创建初始账号，返回是否创建
    pub async fn bootstrap(&self, command: BootstrapAdmin) -> Result<Option<AdminUser>, ApplicationError> {
        if self.admin_repo.count().await? > 0 {
            tracing::debug!("Admin accounts exist, skipping bootstrap");
            return Ok(None);
        }

        let admin = self.new_admin(&command.username, command.password).await?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Bootstrap admin created");

        Ok(Some(admin))
    }

    async fn new_admin(&self, username: &str, password: String) -> Result<AdminUser, ApplicationError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        let hash = hash_password(password, self.iterations).await?;

        let admin = AdminUser::new(username, hash);
        self.admin_repo.save(&admin).await?;
        Ok(admin)
    }
}

/// 哈希计算放到阻塞线程池
async fn hash_password(password: Password, iterations: u32) -> Result<PasswordHash, ApplicationError> {
    tokio::task::spawn_blocking(move || PasswordHash::generate(&password, iterations))
        .await
        .map_err(|e| ApplicationError::internal(format!("Hashing task failed: {}", e)))
}

async fn verify_password(hash: PasswordHash, candidate: String) -> Result<bool, ApplicationError> {
    tokio::task::spawn_blocking(move || hash.verify(&candidate))
        .await
        .map_err(|e| ApplicationError::internal(format!("Hashing task failed: {}", e)))
}
