//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repositories、SessionStore、FileStorage）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::handlers::{
    AuthCommandHandler, ContractCommandHandler, ContractorCommandHandler,
    GoodsCategoryCommandHandler, IndicatorCommandHandler, NewsCommandHandler,
    NoticeCommandHandler, PageCommandHandler, UploadCommandHandler,
};

pub use error::ApplicationError;

pub use ports::{
    AdminRepositoryPort, AdminSession, ContractRepositoryPort, ContractorRepositoryPort,
    FileStoragePort, GoodsCategoryRepositoryPort, IndicatorRepositoryPort, NewsRepositoryPort,
    NoticeRepositoryPort, PageRepositoryPort, Paged, Paging, RepositoryError, SessionError,
    SessionStorePort, StorageError, StoredFile,
};

pub use queries::handlers::{
    AdminQueryHandler, HomeQueryHandler, IndicatorQueryHandler, NewsQueryHandler,
    NoticeQueryHandler, PageQueryHandler, ProcurementQueryHandler,
};
