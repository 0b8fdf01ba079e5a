//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::identity::DEFAULT_ITERATIONS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 上传存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 管理员认证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 前端静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,

    /// 允许跨域的来源，为空时允许任意来源
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/portal.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 上传存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 上传文件根目录（含 images/ 与 documents/）
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,

    /// 上传文件的公开 URL 前缀
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

fn default_public_path() -> String {
    "/uploads".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            max_upload_size: default_max_upload_size(),
            public_path: default_public_path(),
        }
    }
}

/// 管理员认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 会话有效期（秒），每次访问顺延
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// 过期会话清理间隔（秒）
    #[serde(default = "default_gc_interval")]
    pub gc_interval_secs: u64,

    /// 初始管理员用户名
    #[serde(default = "default_bootstrap_username")]
    pub bootstrap_username: String,

    /// 初始管理员密码，未设置时不创建
    #[serde(default)]
    pub bootstrap_password: Option<String>,

    /// PBKDF2 迭代次数
    #[serde(default = "default_password_iterations")]
    pub password_iterations: u32,

    /// 会话 Cookie 名称
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// 会话 Cookie 是否带 Secure 标记，经 HTTPS 部署时开启
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_session_ttl() -> u64 {
    8 * 3600 // 8 小时
}

fn default_gc_interval() -> u64 {
    600
}

fn default_bootstrap_username() -> String {
    "admin".to_string()
}

fn default_password_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_cookie_name() -> String {
    "hsp_session".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            gc_interval_secs: default_gc_interval(),
            bootstrap_username: default_bootstrap_username(),
            bootstrap_password: None,
            password_iterations: default_password_iterations(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.database.path, "data/portal.db");
        assert_eq!(config.storage.public_path, "/uploads");
        assert_eq!(config.auth.session_ttl_secs, 8 * 3600);
        assert_eq!(config.auth.cookie_name, "hsp_session");
        assert!(config.auth.bootstrap_password.is_none());
        assert!(!config.auth.secure_cookie);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"auth": {"cookie_name": "sid"}}"#).unwrap();
        assert_eq!(config.auth.cookie_name, "sid");
        assert_eq!(config.auth.password_iterations, 100_000);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
