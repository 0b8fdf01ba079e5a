//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod file_storage;
mod repositories;
mod session_store;

pub use file_storage::{content_type_for, FileStoragePort, StorageError, StoredFile, UploadKind};
pub use repositories::{
    AdminRepositoryPort, ContractRepositoryPort, ContractorRepositoryPort,
    GoodsCategoryRepositoryPort, IndicatorRepositoryPort, NewsRepositoryPort,
    NoticeRepositoryPort, PageRepositoryPort, Paged, Paging, RepositoryError, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use session_store::{AdminSession, SessionError, SessionStorePort};
