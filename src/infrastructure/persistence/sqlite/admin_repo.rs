//! SQLite Admin Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{db_error, format_timestamp, parse_timestamp, parse_uuid, serialization_error};
use super::DbPool;
use crate::application::ports::{AdminRepositoryPort, RepositoryError};
use crate::domain::identity::{AdminUser, PasswordHash, Username};

/// SQLite Admin Repository
pub struct SqliteAdminRepository {
    pool: DbPool,
}

impl SqliteAdminRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AdminRow {
    id: String,
    username: String,
    password_hash: String,
    created_at: String,
    last_login_at: Option<String>,
}

impl TryFrom<AdminRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(AdminUser {
            id: parse_uuid(&row.id)?,
            username: Username::new(&row.username).map_err(serialization_error)?,
            password_hash: PasswordHash::parse(&row.password_hash).map_err(serialization_error)?,
            created_at: parse_timestamp(&row.created_at)?,
            last_login_at: row.last_login_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

const ADMIN_COLUMNS: &str = "id, username, password_hash, created_at, last_login_at";

#[async_trait]
impl AdminRepositoryPort for SqliteAdminRepository {
    async fn save(&self, admin: &AdminUser) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, username, password_hash, created_at, last_login_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                password_hash = excluded.password_hash,
                last_login_at = excluded.last_login_at
            "#,
        )
        .bind(admin.id.to_string())
        .bind(admin.username.as_str())
        .bind(admin.password_hash.encode())
        .bind(format_timestamp(&admin.created_at))
        .bind(admin.last_login_at.as_ref().map(format_timestamp))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepositoryError> {
        let row: Option<AdminRow> =
            sqlx::query_as(&format!("SELECT {} FROM admins WHERE id = ?", ADMIN_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(AdminUser::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        let row: Option<AdminRow> =
            sqlx::query_as(&format!("SELECT {} FROM admins WHERE username = ?", ADMIN_COLUMNS))
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(AdminUser::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let rows: Vec<AdminRow> =
            sqlx::query_as(&format!("SELECT {} FROM admins ORDER BY username", ADMIN_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        rows.into_iter().map(AdminUser::try_from).collect()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn delete_unless_last(&self, id: Uuid) -> Result<bool, RepositoryError> {
        // 计数与删除在同一条语句内完成
        let result = sqlx::query(
            "DELETE FROM admins WHERE id = ? AND (SELECT COUNT(*) FROM admins) > 1",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admins SET last_login_at = ? WHERE id = ?")
            .bind(format_timestamp(&at))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Password;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn setup() -> SqliteAdminRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteAdminRepository::new(pool)
    }

    fn admin(name: &str) -> AdminUser {
        let password = Password::new("correct horse").unwrap();
        AdminUser::new(Username::new(name).unwrap(), PasswordHash::generate(&password, 10))
    }

    #[tokio::test]
    async fn test_delete_unless_last_keeps_final_admin() {
        let repo = setup().await;
        let alpha = admin("alpha");
        let bravo = admin("bravo");
        repo.save(&alpha).await.unwrap();
        repo.save(&bravo).await.unwrap();

        assert!(repo.delete_unless_last(alpha.id).await.unwrap());
        assert!(!repo.delete_unless_last(bravo.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find_by_id(bravo.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_unless_last_unknown_id() {
        let repo = setup().await;
        repo.save(&admin("alpha")).await.unwrap();
        repo.save(&admin("bravo")).await.unwrap();

        assert!(!repo.delete_unless_last(Uuid::new_v4()).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
