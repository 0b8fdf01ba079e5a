//! HSP Portal - 卫生系统项目门户
//!
//! 架构:
//! - Domain: content/, notice/, procurement/, results/, identity/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters

use std::sync::Arc;

use hsp_portal::application::commands::BootstrapAdmin;
use hsp_portal::application::{AdminRepositoryPort, AuthCommandHandler, SessionStorePort};
use hsp_portal::config::{load_config, print_config, AppConfig};
use hsp_portal::infrastructure::adapters::LocalFileStorage;
use hsp_portal::infrastructure::http::{AppPorts, AppState, AuthSettings, HttpServer, ServerConfig};
use hsp_portal::infrastructure::memory::{spawn_session_gc, InMemorySessionStore};
use hsp_portal::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAdminRepository,
    SqliteContractRepository, SqliteContractorRepository, SqliteGoodsCategoryRepository,
    SqliteIndicatorRepository, SqliteNewsRepository, SqliteNoticeRepository,
    SqlitePageRepository,
};

fn init_logging(config: &AppConfig) {
    let log_filter = format!(
        "{},hsp_portal={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 管理员表为空时按配置创建初始账号
async fn bootstrap_admin(
    config: &AppConfig,
    admin_repo: Arc<dyn AdminRepositoryPort>,
    session_store: Arc<dyn SessionStorePort>,
) -> anyhow::Result<()> {
    let Some(password) = config.auth.bootstrap_password.clone() else {
        if admin_repo.count().await? == 0 {
            tracing::warn!(
                "No admin accounts exist and auth.bootstrap_password is not set; admin login is unavailable"
            );
        }
        return Ok(());
    };

    let handler = AuthCommandHandler::new(admin_repo, session_store, config.auth.password_iterations);
    handler
        .bootstrap(BootstrapAdmin {
            username: config.auth.bootstrap_username.clone(),
            password,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bootstrap admin: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config);

    tracing::info!("HSP Portal v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 上传存储
    let file_storage = LocalFileStorage::new(
        &config.storage.uploads_dir,
        &config.storage.public_path,
        config.storage.max_upload_size,
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to prepare uploads directory: {}", e))?;

    // 会话存储及过期清理
    let session_store: Arc<dyn SessionStorePort> =
        Arc::new(InMemorySessionStore::new(config.auth.session_ttl_secs));
    let gc_handle = spawn_session_gc(session_store.clone(), config.auth.gc_interval_secs);

    let admin_repo: Arc<dyn AdminRepositoryPort> = Arc::new(SqliteAdminRepository::new(pool.clone()));
    bootstrap_admin(&config, admin_repo.clone(), session_store.clone()).await?;

    let ports = AppPorts {
        page_repo: Arc::new(SqlitePageRepository::new(pool.clone())),
        news_repo: Arc::new(SqliteNewsRepository::new(pool.clone())),
        notice_repo: Arc::new(SqliteNoticeRepository::new(pool.clone())),
        contractor_repo: Arc::new(SqliteContractorRepository::new(pool.clone())),
        category_repo: Arc::new(SqliteGoodsCategoryRepository::new(pool.clone())),
        contract_repo: Arc::new(SqliteContractRepository::new(pool.clone())),
        indicator_repo: Arc::new(SqliteIndicatorRepository::new(pool.clone())),
        admin_repo,
        session_store,
        file_storage: Arc::new(file_storage),
    };
    let auth = AuthSettings {
        cookie_name: config.auth.cookie_name.clone(),
        session_ttl_secs: config.auth.session_ttl_secs,
        password_iterations: config.auth.password_iterations,
        secure_cookie: config.auth.secure_cookie,
    };

    // 创建 HTTP 服务器
    let static_files = &config.server.static_files;
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        uploads_dir: config.storage.uploads_dir.clone(),
        uploads_path: config.storage.public_path.clone(),
        static_files: static_files
            .enabled
            .then(|| (static_files.dir.clone(), static_files.path.clone())),
        cors_origins: config.server.cors_origins.clone(),
        max_upload_size: config.storage.max_upload_size,
    };
    let server = HttpServer::new(server_config, AppState::new(ports, auth));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    gc_handle.abort();
    pool.close().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
