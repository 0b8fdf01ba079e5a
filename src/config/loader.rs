//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `HSP_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `HSP_SERVER__PORT=8080`
/// - `HSP_DATABASE__PATH=/data/portal.db`
/// - `HSP_AUTH__BOOTSTRAP_PASSWORD=...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("database.path", "data/portal.db")?
        .set_default("database.max_connections", 5)?
        .set_default("storage.uploads_dir", "data/uploads")?
        .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
        .set_default("storage.public_path", "/uploads")?
        .set_default("auth.session_ttl_secs", 8 * 3600)?
        .set_default("auth.gc_interval_secs", 600)?
        .set_default("auth.bootstrap_username", "admin")?
        .set_default("auth.password_iterations", 100_000)?
        .set_default("auth.cookie_name", "hsp_session")?
        .set_default("auth.secure_cookie", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("HSP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.server.port == 0 {
        return invalid("Server port cannot be 0");
    }

    if config.database.path.is_empty() {
        return invalid("Database path cannot be empty");
    }

    if config.storage.uploads_dir.as_os_str().is_empty() {
        return invalid("Uploads directory cannot be empty");
    }

    if config.storage.max_upload_size == 0 {
        return invalid("Max upload size cannot be 0");
    }

    if !config.storage.public_path.starts_with('/') || config.storage.public_path.len() < 2 {
        return invalid("Uploads public path must be an absolute URL path such as /uploads");
    }

    if config.auth.session_ttl_secs == 0 {
        return invalid("Session TTL cannot be 0");
    }

    if config.auth.gc_interval_secs == 0 {
        return invalid("Session GC interval cannot be 0");
    }

    if config.auth.password_iterations == 0 {
        return invalid("Password iterations cannot be 0");
    }

    if config.auth.cookie_name.is_empty() {
        return invalid("Session cookie name cannot be empty");
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出初始管理员密码
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    if config.server.static_files.enabled {
        tracing::info!(
            "Static Files: {:?} at {}",
            config.server.static_files.dir,
            config.server.static_files.path
        );
    }
    if !config.server.cors_origins.is_empty() {
        tracing::info!("CORS Origins: {}", config.server.cors_origins.join(", "));
    }
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Uploads Directory: {:?}", config.storage.uploads_dir);
    tracing::info!("Uploads Public Path: {}", config.storage.public_path);
    tracing::info!("Max Upload Size: {} bytes", config.storage.max_upload_size);
    tracing::info!("Session TTL: {}s", config.auth.session_ttl_secs);
    tracing::info!("Session GC Interval: {}s", config.auth.gc_interval_secs);
    tracing::info!(
        "Bootstrap Admin: {} (password {})",
        config.auth.bootstrap_username,
        if config.auth.bootstrap_password.is_some() { "set" } else { "not set" }
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_limits() {
        let mut config = AppConfig::default();
        config.storage.max_upload_size = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.auth.session_ttl_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.auth.gc_interval_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.auth.password_iterations = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_relative_public_path() {
        let mut config = AppConfig::default();
        config.storage.public_path = "uploads".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[auth]\nbootstrap_password = \"first-login-pass\"\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.bootstrap_password.as_deref(), Some("first-login-pass"));
        assert_eq!(config.storage.public_path, "/uploads");
    }
}
