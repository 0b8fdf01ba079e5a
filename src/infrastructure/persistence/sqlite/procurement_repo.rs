//! SQLite Procurement Repositories - 承包商、货物类别、合同

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{
    db_error, format_date, format_timestamp, parse_date, parse_timestamp, parse_uuid,
    serialization_error,
};
use super::DbPool;
use crate::application::ports::{
    ContractRepositoryPort, ContractorRepositoryPort, GoodsCategoryRepositoryPort, RepositoryError,
};
use crate::domain::procurement::{Contract, ContractKind, ContractStatus, Contractor, GoodsCategory};

// ============================================================================
// Contractor
// ============================================================================

/// SQLite Contractor Repository
pub struct SqliteContractorRepository {
    pool: DbPool,
}

impl SqliteContractorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ContractorRow {
    id: String,
    name: String,
    address: String,
    contact_person: String,
    phone: String,
    email: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ContractorRow> for Contractor {
    type Error = RepositoryError;

    fn try_from(row: ContractorRow) -> Result<Self, Self::Error> {
        Ok(Contractor {
            id: parse_uuid(&row.id)?,
            name: row.name,
            address: row.address,
            contact_person: row.contact_person,
            phone: row.phone,
            email: row.email,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

const CONTRACTOR_COLUMNS: &str =
    "id, name, address, contact_person, phone, email, created_at, updated_at";

#[async_trait]
impl ContractorRepositoryPort for SqliteContractorRepository {
    async fn save(&self, contractor: &Contractor) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO contractors (id, name, address, contact_person, phone, email, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                contact_person = excluded.contact_person,
                phone = excluded.phone,
                email = excluded.email,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(contractor.id.to_string())
        .bind(&contractor.name)
        .bind(&contractor.address)
        .bind(&contractor.contact_person)
        .bind(&contractor.phone)
        .bind(contractor.email.as_deref())
        .bind(format_timestamp(&contractor.created_at))
        .bind(format_timestamp(&contractor.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contractor>, RepositoryError> {
        let row: Option<ContractorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contractors WHERE id = ?",
            CONTRACTOR_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Contractor::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Contractor>, RepositoryError> {
        let rows: Vec<ContractorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contractors ORDER BY name",
            CONTRACTOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Contractor::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM contractors WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

// ============================================================================
// Goods Category
// ============================================================================

/// SQLite Goods Category Repository
pub struct SqliteGoodsCategoryRepository {
    pool: DbPool,
}

impl SqliteGoodsCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GoodsCategoryRow {
    id: String,
    name: String,
    description: String,
    created_at: String,
}

impl TryFrom<GoodsCategoryRow> for GoodsCategory {
    type Error = RepositoryError;

    fn try_from(row: GoodsCategoryRow) -> Result<Self, Self::Error> {
        Ok(GoodsCategory {
            id: parse_uuid(&row.id)?,
            name: row.name,
            description: row.description,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl GoodsCategoryRepositoryPort for SqliteGoodsCategoryRepository {
    async fn save(&self, category: &GoodsCategory) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO goods_categories (id, name, description, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description
            "#,
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .bind(&category.description)
        .bind(format_timestamp(&category.created_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GoodsCategory>, RepositoryError> {
        let row: Option<GoodsCategoryRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM goods_categories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(GoodsCategory::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<GoodsCategory>, RepositoryError> {
        let rows: Vec<GoodsCategoryRow> = sqlx::query_as(
            "SELECT id, name, description, created_at FROM goods_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(GoodsCategory::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM goods_categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

// ============================================================================
// Contract
// ============================================================================

/// SQLite Contract Repository
pub struct SqliteContractRepository {
    pool: DbPool,
}

impl SqliteContractRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ContractRow {
    id: String,
    kind: String,
    package_no: String,
    title: String,
    description: String,
    contractor_id: String,
    category_id: Option<String>,
    contract_value: f64,
    signing_date: String,
    completion_date: Option<String>,
    status: String,
    progress: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ContractRow> for Contract {
    type Error = RepositoryError;

    fn try_from(row: ContractRow) -> Result<Self, Self::Error> {
        Ok(Contract {
            id: parse_uuid(&row.id)?,
            kind: ContractKind::from_str(&row.kind)
                .ok_or_else(|| serialization_error(format!("unknown contract kind {}", row.kind)))?,
            package_no: row.package_no,
            title: row.title,
            description: row.description,
            contractor_id: parse_uuid(&row.contractor_id)?,
            category_id: row.category_id.as_deref().map(parse_uuid).transpose()?,
            contract_value: row.contract_value,
            signing_date: parse_date(&row.signing_date)?,
            completion_date: row.completion_date.as_deref().map(parse_date).transpose()?,
            status: ContractStatus::from_str(&row.status)
                .ok_or_else(|| serialization_error(format!("unknown contract status {}", row.status)))?,
            progress: u8::try_from(row.progress).map_err(serialization_error)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

const CONTRACT_COLUMNS: &str = "id, kind, package_no, title, description, contractor_id, category_id, contract_value, signing_date, completion_date, status, progress, created_at, updated_at";

#[async_trait]
impl ContractRepositoryPort for SqliteContractRepository {
    async fn save(&self, contract: &Contract) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO contracts (id, kind, package_no, title, description, contractor_id, category_id,
                                   contract_value, signing_date, completion_date, status, progress, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                package_no = excluded.package_no,
                title = excluded.title,
                description = excluded.description,
                contractor_id = excluded.contractor_id,
                category_id = excluded.category_id,
                contract_value = excluded.contract_value,
                signing_date = excluded.signing_date,
                completion_date = excluded.completion_date,
                status = excluded.status,
                progress = excluded.progress,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(contract.id.to_string())
        .bind(contract.kind.as_str())
        .bind(&contract.package_no)
        .bind(&contract.title)
        .bind(&contract.description)
        .bind(contract.contractor_id.to_string())
        .bind(contract.category_id.map(|id| id.to_string()))
        .bind(contract.contract_value)
        .bind(format_date(&contract.signing_date))
        .bind(contract.completion_date.as_ref().map(format_date))
        .bind(contract.status.as_str())
        .bind(i64::from(contract.progress))
        .bind(format_timestamp(&contract.created_at))
        .bind(format_timestamp(&contract.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, RepositoryError> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE id = ?",
            CONTRACT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Contract::try_from).transpose()
    }

    async fn find_by_kind(
        &self,
        kind: ContractKind,
        status: Option<ContractStatus>,
    ) -> Result<Vec<Contract>, RepositoryError> {
        let rows: Vec<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE kind = ? AND (? IS NULL OR status = ?) ORDER BY signing_date DESC, package_no",
            CONTRACT_COLUMNS
        ))
        .bind(kind.as_str())
        .bind(status.map(|s| s.as_str()))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Contract::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM contracts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn count_by_contractor(&self, contractor_id: Uuid) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE contractor_id = ?")
            .bind(contractor_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contracts WHERE category_id = ?")
            .bind(category_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }
}
