//! Result Framework HTTP Handlers - 指标与进度报告

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    AddStatusUpdate, CreateIndicator, DeleteIndicator, IndicatorInput, RemoveStatusUpdate,
    UpdateIndicator,
};
use crate::application::queries::handlers::{IndicatorDetail, IndicatorView};
use crate::application::queries::{GetIndicator, ListIndicators};
use crate::domain::results::{Indicator, StatusUpdate, YearlyTarget};
use crate::infrastructure::http::dto::{ApiResponse, ApiResult, Empty, JsonBody};
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IndicatorRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub baseline_value: f64,
    pub baseline_year: i32,
    #[serde(default)]
    pub targets: Vec<YearlyTarget>,
    #[serde(default)]
    pub description: String,
}

impl From<IndicatorRequest> for IndicatorInput {
    fn from(req: IndicatorRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            unit: req.unit,
            baseline_value: req.baseline_value,
            baseline_year: req.baseline_year,
            targets: req.targets,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub reported_on: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub remarks: String,
}

/// 指标列表（含进度）
pub async fn list_indicators(State(state): State<Arc<AppState>>) -> ApiResult<Vec<IndicatorView>> {
    let indicators = state.indicator_queries.list(ListIndicators).await?;
    Ok(Json(ApiResponse::success(indicators)))
}

/// 指标详情（含全部进度报告）
pub async fn get_indicator(
    State(state): State<Arc<AppState>>,
    Path(indicator_id): Path<Uuid>,
) -> ApiResult<IndicatorDetail> {
    let detail = state.indicator_queries.get(GetIndicator { indicator_id }).await?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn create_indicator(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<IndicatorRequest>,
) -> ApiResult<Indicator> {
    let indicator = state
        .indicator_commands
        .create(CreateIndicator { input: req.into() })
        .await?;
    Ok(Json(ApiResponse::success(indicator)))
}

pub async fn update_indicator(
    State(state): State<Arc<AppState>>,
    Path(indicator_id): Path<Uuid>,
    JsonBody(req): JsonBody<IndicatorRequest>,
) -> ApiResult<Indicator> {
    let indicator = state
        .indicator_commands
        .update(UpdateIndicator {
            indicator_id,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(indicator)))
}

pub async fn delete_indicator(
    State(state): State<Arc<AppState>>,
    Path(indicator_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state
        .indicator_commands
        .delete(DeleteIndicator { indicator_id })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn add_status_update(
    State(state): State<Arc<AppState>>,
    Path(indicator_id): Path<Uuid>,
    JsonBody(req): JsonBody<StatusUpdateRequest>,
) -> ApiResult<StatusUpdate> {
    let update = state
        .indicator_commands
        .add_update(AddStatusUpdate {
            indicator_id,
            reported_on: req.reported_on,
            value: req.value,
            remarks: req.remarks,
        })
        .await?;
    Ok(Json(ApiResponse::success(update)))
}

pub async fn remove_status_update(
    State(state): State<Arc<AppState>>,
    Path((indicator_id, update_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Empty> {
    state
        .indicator_commands
        .remove_update(RemoveStatusUpdate {
            indicator_id,
            update_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
