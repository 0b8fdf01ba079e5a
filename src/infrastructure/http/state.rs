//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AuthCommandHandler, ContractCommandHandler, ContractorCommandHandler,
    GoodsCategoryCommandHandler, IndicatorCommandHandler, NewsCommandHandler,
    NoticeCommandHandler, PageCommandHandler, UploadCommandHandler,
    // Query handlers
    AdminQueryHandler, HomeQueryHandler, IndicatorQueryHandler, NewsQueryHandler,
    NoticeQueryHandler, PageQueryHandler, ProcurementQueryHandler,
    // Ports
    AdminRepositoryPort, ContractRepositoryPort, ContractorRepositoryPort, FileStoragePort,
    GoodsCategoryRepositoryPort, IndicatorRepositoryPort, NewsRepositoryPort,
    NoticeRepositoryPort, PageRepositoryPort, SessionStorePort,
};

/// 组装应用状态所需的全部端口
#[derive(Clone)]
pub struct AppPorts {
    pub page_repo: Arc<dyn PageRepositoryPort>,
    pub news_repo: Arc<dyn NewsRepositoryPort>,
    pub notice_repo: Arc<dyn NoticeRepositoryPort>,
    pub contractor_repo: Arc<dyn ContractorRepositoryPort>,
    pub category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
    pub contract_repo: Arc<dyn ContractRepositoryPort>,
    pub indicator_repo: Arc<dyn IndicatorRepositoryPort>,
    pub admin_repo: Arc<dyn AdminRepositoryPort>,
    pub session_store: Arc<dyn SessionStorePort>,
    pub file_storage: Arc<dyn FileStoragePort>,
}

/// 会话相关设置
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub cookie_name: String,
    pub session_ttl_secs: u64,
    pub password_iterations: u32,
    pub secure_cookie: bool,
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_store: Arc<dyn SessionStorePort>,
    pub auth: AuthSettings,

    // ========== Command Handlers ==========
    pub page_commands: PageCommandHandler,
    pub news_commands: NewsCommandHandler,
    pub notice_commands: NoticeCommandHandler,
    pub contractor_commands: ContractorCommandHandler,
    pub category_commands: GoodsCategoryCommandHandler,
    pub contract_commands: ContractCommandHandler,
    pub indicator_commands: IndicatorCommandHandler,
    pub auth_commands: AuthCommandHandler,
    pub upload_commands: UploadCommandHandler,

    // ========== Query Handlers ==========
    pub page_queries: PageQueryHandler,
    pub news_queries: NewsQueryHandler,
    pub home_queries: HomeQueryHandler,
    pub notice_queries: NoticeQueryHandler,
    pub procurement_queries: ProcurementQueryHandler,
    pub indicator_queries: IndicatorQueryHandler,
    pub admin_queries: AdminQueryHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(ports: AppPorts, auth: AuthSettings) -> Self {
        let AppPorts {
            page_repo,
            news_repo,
            notice_repo,
            contractor_repo,
            category_repo,
            contract_repo,
            indicator_repo,
            admin_repo,
            session_store,
            file_storage,
        } = ports;

        Self {
            session_store: session_store.clone(),

            // Command handlers
            page_commands: PageCommandHandler::new(page_repo.clone()),
            news_commands: NewsCommandHandler::new(news_repo.clone()),
            notice_commands: NoticeCommandHandler::new(notice_repo.clone(), file_storage.clone()),
            contractor_commands: ContractorCommandHandler::new(
                contractor_repo.clone(),
                contract_repo.clone(),
            ),
            category_commands: GoodsCategoryCommandHandler::new(
                category_repo.clone(),
                contract_repo.clone(),
            ),
            contract_commands: ContractCommandHandler::new(
                contract_repo.clone(),
                contractor_repo.clone(),
                category_repo.clone(),
            ),
            indicator_commands: IndicatorCommandHandler::new(indicator_repo.clone()),
            auth_commands: AuthCommandHandler::new(
                admin_repo.clone(),
                session_store,
                auth.password_iterations,
            ),
            upload_commands: UploadCommandHandler::new(file_storage),

            // Query handlers
            page_queries: PageQueryHandler::new(page_repo),
            news_queries: NewsQueryHandler::new(news_repo.clone()),
            home_queries: HomeQueryHandler::new(news_repo, notice_repo.clone()),
            notice_queries: NoticeQueryHandler::new(notice_repo),
            procurement_queries: ProcurementQueryHandler::new(
                contractor_repo,
                category_repo,
                contract_repo,
            ),
            indicator_queries: IndicatorQueryHandler::new(indicator_repo),
            admin_queries: AdminQueryHandler::new(admin_repo),

            auth,
        }
    }
}
