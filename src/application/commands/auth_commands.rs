//! Auth Commands

use uuid::Uuid;

/// 登录命令
#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub password: String,
}

/// 注销命令
#[derive(Debug, Clone)]
pub struct Logout {
    pub token: String,
}

/// 修改密码命令
///
/// 成功后注销该管理员除当前令牌外的所有会话
#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub admin_id: Uuid,
    pub token: String,
    pub current_password: String,
    pub new_password: String,
}

/// 创建管理员命令
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub password: String,
}

/// 删除管理员命令
#[derive(Debug, Clone)]
pub struct DeleteAdmin {
    /// 发起删除的管理员
    pub actor_id: Uuid,
    pub admin_id: Uuid,
}

/// 启动时初始化管理员（仅当没有任何管理员时生效）
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}
