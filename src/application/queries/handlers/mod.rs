//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod admin_handlers;
mod content_handlers;
mod indicator_handlers;
mod notice_handlers;
mod procurement_handlers;

pub use admin_handlers::*;
pub use content_handlers::*;
pub use indicator_handlers::*;
pub use notice_handlers::*;
pub use procurement_handlers::*;
