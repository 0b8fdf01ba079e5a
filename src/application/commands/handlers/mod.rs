//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod auth_handlers;
mod indicator_handlers;
mod news_handlers;
mod notice_handlers;
mod page_handlers;
mod procurement_handlers;
mod upload_handlers;

pub use auth_handlers::*;
pub use indicator_handlers::*;
pub use news_handlers::*;
pub use notice_handlers::*;
pub use page_handlers::*;
pub use procurement_handlers::*;
pub use upload_handlers::*;
