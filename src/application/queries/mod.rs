//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod admin_queries;
mod content_queries;
mod indicator_queries;
mod notice_queries;
mod procurement_queries;

pub mod handlers;

pub use admin_queries::*;
pub use content_queries::*;
pub use indicator_queries::*;
pub use notice_queries::*;
pub use procurement_queries::*;
