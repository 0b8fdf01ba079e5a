//! HSP Portal - 卫生系统项目门户后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Content Context: 页面与新闻
//! - Notice Context: 公告与子公告
//! - Procurement Context: 承包商、货物类别、合同
//! - Results Context: 结果框架指标与进度报告
//! - Identity Context: 管理员账号
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, SessionStore, FileStorage）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（公开接口 + /api/admin 管理接口）
//! - Memory: 管理员会话内存存储
//! - Persistence: SQLite 存储
//! - Adapters: 本地上传文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
