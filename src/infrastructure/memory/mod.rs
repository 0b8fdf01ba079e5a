//! Memory Layer - In-Memory State Management
//!
//! 管理员登录会话的内存实现

mod session_store;

pub use session_store::{spawn_session_gc, InMemorySessionStore};
