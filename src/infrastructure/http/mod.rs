//! HTTP Layer - RESTful API
//!
//! 公开接口 + 需要会话的管理接口，静态托管上传文件与前端

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::{AppPorts, AppState, AuthSettings};
