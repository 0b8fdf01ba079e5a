//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod auth_commands;
mod indicator_commands;
mod news_commands;
mod notice_commands;
mod page_commands;
mod procurement_commands;
mod upload_commands;

pub mod handlers;

pub use auth_commands::*;
pub use indicator_commands::*;
pub use news_commands::*;
pub use notice_commands::*;
pub use page_commands::*;
pub use procurement_commands::*;
pub use upload_commands::*;
