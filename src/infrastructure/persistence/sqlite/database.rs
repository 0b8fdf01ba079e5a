//! SQLite Database - 数据库连接和迁移

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;
use uuid::Uuid;

use crate::application::ports::RepositoryError;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库连接串
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/portal.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    /// 内存数据库只能使用单连接，否则每个连接各自一份数据
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA foreign_keys=ON")
        .execute(&pool)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "SQLite pool created with WAL mode and busy_timeout=5000ms"
    );

    Ok(pool)
}

/// 运行数据库迁移（幂等）
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    const STATEMENTS: &[&str] = &[
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            content_html TEXT NOT NULL,
            builder_data TEXT,
            published INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS news (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            summary TEXT NOT NULL,
            body_html TEXT NOT NULL,
            cover_image TEXT,
            gallery TEXT NOT NULL DEFAULT '[]',
            published_on TEXT NOT NULL,
            published INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS notices (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            published_on TEXT NOT NULL,
            kind TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS contractors (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            address TEXT NOT NULL,
            contact_person TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS goods_categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS contracts (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            package_no TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            contractor_id TEXT NOT NULL,
            category_id TEXT,
            contract_value REAL NOT NULL,
            signing_date TEXT NOT NULL,
            completion_date TEXT,
            status TEXT NOT NULL,
            progress INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (contractor_id) REFERENCES contractors(id),
            FOREIGN KEY (category_id) REFERENCES goods_categories(id),
            UNIQUE (kind, package_no)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS indicators (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            unit TEXT NOT NULL,
            baseline_value REAL NOT NULL,
            baseline_year INTEGER NOT NULL,
            targets TEXT NOT NULL DEFAULT '[]',
            description TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS indicator_updates (
            id TEXT PRIMARY KEY,
            indicator_id TEXT NOT NULL,
            reported_on TEXT NOT NULL,
            value REAL NOT NULL,
            remarks TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (indicator_id) REFERENCES indicators(id) ON DELETE CASCADE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            last_login_at TEXT
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_news_published_on ON news(published_on)",
        "CREATE INDEX IF NOT EXISTS idx_notices_published_on ON notices(published_on)",
        "CREATE INDEX IF NOT EXISTS idx_contracts_kind ON contracts(kind)",
        "CREATE INDEX IF NOT EXISTS idx_contracts_contractor_id ON contracts(contractor_id)",
        "CREATE INDEX IF NOT EXISTS idx_indicator_updates_indicator_id ON indicator_updates(indicator_id)",
    ];

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!(statements = STATEMENTS.len(), "Database migrations completed");
    Ok(())
}

// ============================================================================
// 行映射辅助函数
// ============================================================================

/// 唯一约束冲突映射为 Duplicate
pub(super) fn db_error(err: sqlx::Error) -> RepositoryError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Duplicate(db.message().to_string()),
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}

pub(super) fn serialization_error(err: impl ToString) -> RepositoryError {
    RepositoryError::SerializationError(err.to_string())
}

pub(super) fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(serialization_error)
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serialization_error)
}

pub(super) fn parse_date(value: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(serialization_error)
}

/// 固定精度，保证按文本排序即按时间排序
pub(super) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(super) fn format_date(value: &NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

const DATE_FORMAT: &str = "%Y-%m-%d";

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // 迁移可重复执行
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let insert = "INSERT INTO admins (id, username, password_hash, created_at) VALUES (?, 'root', 'x', '2024-01-01T00:00:00Z')";
        sqlx::query(insert)
            .bind(Uuid::new_v4().to_string())
            .execute(&pool)
            .await
            .unwrap();
        let err = sqlx::query(insert)
            .bind(Uuid::new_v4().to_string())
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(db_error(err), RepositoryError::Duplicate(_)));
    }

    #[test]
    fn test_timestamp_round_trip_is_sortable() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::milliseconds(1500);
        let (a, b) = (format_timestamp(&earlier), format_timestamp(&later));
        assert!(a < b);
        assert_eq!(parse_timestamp(&a).unwrap().timestamp_micros(), earlier.timestamp_micros());
    }
}
