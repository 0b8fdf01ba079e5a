//! SQLite Indicator Repository - 结果框架指标与进度报告

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{
    db_error, format_date, format_timestamp, parse_date, parse_timestamp, parse_uuid,
    serialization_error,
};
use super::DbPool;
use crate::application::ports::{IndicatorRepositoryPort, RepositoryError};
use crate::domain::results::{Indicator, StatusUpdate};

/// SQLite Indicator Repository
pub struct SqliteIndicatorRepository {
    pool: DbPool,
}

impl SqliteIndicatorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct IndicatorRow {
    id: String,
    code: String,
    name: String,
    unit: String,
    baseline_value: f64,
    baseline_year: i64,
    targets: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<IndicatorRow> for Indicator {
    type Error = RepositoryError;

    fn try_from(row: IndicatorRow) -> Result<Self, Self::Error> {
        Ok(Indicator {
            id: parse_uuid(&row.id)?,
            code: row.code,
            name: row.name,
            unit: row.unit,
            baseline_value: row.baseline_value,
            baseline_year: i32::try_from(row.baseline_year).map_err(serialization_error)?,
            targets: serde_json::from_str(&row.targets).map_err(serialization_error)?,
            description: row.description,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct StatusUpdateRow {
    id: String,
    indicator_id: String,
    reported_on: String,
    value: f64,
    remarks: String,
    created_at: String,
}

impl TryFrom<StatusUpdateRow> for StatusUpdate {
    type Error = RepositoryError;

    fn try_from(row: StatusUpdateRow) -> Result<Self, Self::Error> {
        Ok(StatusUpdate {
            id: parse_uuid(&row.id)?,
            indicator_id: parse_uuid(&row.indicator_id)?,
            reported_on: parse_date(&row.reported_on)?,
            value: row.value,
            remarks: row.remarks,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

const INDICATOR_COLUMNS: &str = "id, code, name, unit, baseline_value, baseline_year, targets, description, created_at, updated_at";
const UPDATE_COLUMNS: &str = "id, indicator_id, reported_on, value, remarks, created_at";

#[async_trait]
impl IndicatorRepositoryPort for SqliteIndicatorRepository {
    async fn save(&self, indicator: &Indicator) -> Result<(), RepositoryError> {
        let targets = serde_json::to_string(&indicator.targets).map_err(serialization_error)?;

        sqlx::query(
            r#"
            INSERT INTO indicators (id, code, name, unit, baseline_value, baseline_year, targets, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                code = excluded.code,
                name = excluded.name,
                unit = excluded.unit,
                baseline_value = excluded.baseline_value,
                baseline_year = excluded.baseline_year,
                targets = excluded.targets,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(indicator.id.to_string())
        .bind(&indicator.code)
        .bind(&indicator.name)
        .bind(&indicator.unit)
        .bind(indicator.baseline_value)
        .bind(i64::from(indicator.baseline_year))
        .bind(targets)
        .bind(&indicator.description)
        .bind(format_timestamp(&indicator.created_at))
        .bind(format_timestamp(&indicator.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Indicator>, RepositoryError> {
        let row: Option<IndicatorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM indicators WHERE id = ?",
            INDICATOR_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Indicator::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Indicator>, RepositoryError> {
        let rows: Vec<IndicatorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM indicators ORDER BY code",
            INDICATOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Indicator::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM indicator_updates WHERE indicator_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query("DELETE FROM indicators WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn save_update(&self, update: &StatusUpdate) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO indicator_updates (id, indicator_id, reported_on, value, remarks, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                reported_on = excluded.reported_on,
                value = excluded.value,
                remarks = excluded.remarks
            "#,
        )
        .bind(update.id.to_string())
        .bind(update.indicator_id.to_string())
        .bind(format_date(&update.reported_on))
        .bind(update.value)
        .bind(&update.remarks)
        .bind(format_timestamp(&update.created_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_update(&self, id: Uuid) -> Result<Option<StatusUpdate>, RepositoryError> {
        let row: Option<StatusUpdateRow> = sqlx::query_as(&format!(
            "SELECT {} FROM indicator_updates WHERE id = ?",
            UPDATE_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(StatusUpdate::try_from).transpose()
    }

    async fn find_updates(&self, indicator_id: Uuid) -> Result<Vec<StatusUpdate>, RepositoryError> {
        let rows: Vec<StatusUpdateRow> = sqlx::query_as(&format!(
            "SELECT {} FROM indicator_updates WHERE indicator_id = ? ORDER BY reported_on DESC, created_at DESC",
            UPDATE_COLUMNS
        ))
        .bind(indicator_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(StatusUpdate::try_from).collect()
    }

    async fn find_all_updates(&self) -> Result<Vec<StatusUpdate>, RepositoryError> {
        let rows: Vec<StatusUpdateRow> = sqlx::query_as(&format!(
            "SELECT {} FROM indicator_updates ORDER BY reported_on DESC, created_at DESC",
            UPDATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(StatusUpdate::try_from).collect()
    }

    async fn delete_update(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM indicator_updates WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
