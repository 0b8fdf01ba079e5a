//! 测试夹具：内存 SQLite + 临时上传目录

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::application::ports::{
    AdminRepositoryPort, ContractRepositoryPort, ContractorRepositoryPort, FileStoragePort,
    GoodsCategoryRepositoryPort, IndicatorRepositoryPort, NewsRepositoryPort,
    NoticeRepositoryPort, PageRepositoryPort, SessionStorePort,
};
use crate::infrastructure::adapters::LocalFileStorage;
use crate::infrastructure::memory::InMemorySessionStore;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAdminRepository,
    SqliteContractRepository, SqliteContractorRepository, SqliteGoodsCategoryRepository,
    SqliteIndicatorRepository, SqliteNewsRepository, SqliteNoticeRepository,
    SqlitePageRepository,
};

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];
/// 测试用低迭代次数
pub const TEST_ITERATIONS: u32 = 1_000;
pub const MAX_UPLOAD_SIZE: u64 = 64 * 1024;

pub struct Fixture {
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
    uploads_dir: TempDir,
}

impl Fixture {
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let uploads_dir = tempfile::tempdir().unwrap();
        let file_storage = LocalFileStorage::new(uploads_dir.path(), "/uploads", MAX_UPLOAD_SIZE)
            .await
            .unwrap();

        Self {
            page_repo: Arc::new(SqlitePageRepository::new(pool.clone())),
            news_repo: Arc::new(SqliteNewsRepository::new(pool.clone())),
            notice_repo: Arc::new(SqliteNoticeRepository::new(pool.clone())),
            contractor_repo: Arc::new(SqliteContractorRepository::new(pool.clone())),
            category_repo: Arc::new(SqliteGoodsCategoryRepository::new(pool.clone())),
            contract_repo: Arc::new(SqliteContractRepository::new(pool.clone())),
            indicator_repo: Arc::new(SqliteIndicatorRepository::new(pool.clone())),
            admin_repo: Arc::new(SqliteAdminRepository::new(pool.clone())),
            session_store: Arc::new(InMemorySessionStore::new(3600)),
            file_storage: Arc::new(file_storage),
            uploads_dir,
        }
    }

    pub fn uploads_root(&self) -> PathBuf {
        self.uploads_dir.path().to_path_buf()
    }

    /// 上传子目录（images / documents）中的文件数
    pub fn stored_file_count(&self, dir: &str) -> usize {
        std::fs::read_dir(self.uploads_dir.path().join(dir))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
