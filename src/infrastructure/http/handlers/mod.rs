//! HTTP Handlers
//!
//! 公开接口与 /api/admin 管理接口

mod auth;
mod content;
mod indicator;
mod notice;
mod ping;
mod procurement;
mod upload;

pub use auth::*;
pub use content::*;
pub use indicator::*;
pub use notice::*;
pub use ping::*;
pub use procurement::*;
pub use upload::*;
