//! SQLite Persistence - SQLite 数据库持久化实现

mod admin_repo;
mod content_repo;
mod database;
mod indicator_repo;
mod notice_repo;
mod procurement_repo;

pub use admin_repo::*;
pub use content_repo::*;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use indicator_repo::*;
pub use notice_repo::*;
pub use procurement_repo::*;
