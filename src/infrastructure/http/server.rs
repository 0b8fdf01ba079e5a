//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// multipart 表单除文件外的额外开销
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 上传文件目录及其公开路径
    pub uploads_dir: PathBuf,
    pub uploads_path: String,
    /// 前端静态文件目录及挂载路径
    pub static_files: Option<(PathBuf, String)>,
    /// 为空时允许任意来源
    pub cors_origins: Vec<String>,
    pub max_upload_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5080,
            uploads_dir: PathBuf::from("data/uploads"),
            uploads_path: "/uploads".to_string(),
            static_files: None,
            cors_origins: Vec::new(),
            max_upload_size: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        let allow_origin = if origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    }

    /// 构建 Router
    pub(crate) fn build_router(&self) -> Router {
        let body_limit = usize::try_from(self.config.max_upload_size)
            .unwrap_or(usize::MAX)
            .saturating_add(MULTIPART_OVERHEAD);

        let mut router = create_routes(self.state.clone())
            .nest_service(&self.config.uploads_path, ServeDir::new(&self.config.uploads_dir));

        if let Some((dir, path)) = &self.config.static_files {
            let serve_dir = ServeDir::new(dir).append_index_html_on_directories(true);
            router = if path == "/" {
                router.fallback_service(serve_dir)
            } else {
                router.nest_service(path, serve_dir)
            };
        }

        router
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(self.cors_layer())
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}
