//! Procurement HTTP Handlers - 承包商、货物类别、合同

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    ContractInput, ContractorInput, CreateContract, CreateContractor, CreateGoodsCategory,
    DeleteContract, DeleteContractor, DeleteGoodsCategory, GoodsCategoryInput, UpdateContract,
    UpdateContractor, UpdateGoodsCategory,
};
use crate::application::queries::handlers::ContractView;
use crate::application::queries::{
    GetContract, GetContractor, ListContractors, ListContracts, ListGoodsCategories,
};
use crate::domain::procurement::{Contract, ContractKind, Contractor, GoodsCategory};
use crate::infrastructure::http::dto::{ApiResponse, ApiResult, Empty, JsonBody};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ContractorRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<ContractorRequest> for ContractorInput {
    fn from(req: ContractorRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            contact_person: req.contact_person,
            phone: req.phone,
            email: req.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GoodsCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<GoodsCategoryRequest> for GoodsCategoryInput {
    fn from(req: GoodsCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContractRequest {
    pub package_no: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub contractor_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub contract_value: f64,
    pub signing_date: NaiveDate,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
}

impl From<ContractRequest> for ContractInput {
    fn from(req: ContractRequest) -> Self {
        Self {
            package_no: req.package_no,
            title: req.title,
            description: req.description,
            contractor_id: req.contractor_id,
            category_id: req.category_id,
            contract_value: req.contract_value,
            signing_date: req.signing_date,
            completion_date: req.completion_date,
            status: req.status,
            progress: req.progress,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractFilter {
    pub status: Option<String>,
}

/// 未知的合同类型路径段按 404 处理
fn contract_kind(segment: &str) -> Result<ContractKind, ApiError> {
    ContractKind::from_path_segment(segment)
        .map_err(|_| ApiError::NotFound(format!("Unknown contract kind: {}", segment)))
}

// ============================================================================
// Public handlers
// ============================================================================

pub async fn list_contractors(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Contractor>> {
    let contractors = state.procurement_queries.list_contractors(ListContractors).await?;
    Ok(Json(ApiResponse::success(contractors)))
}

pub async fn get_contractor(
    State(state): State<Arc<AppState>>,
    Path(contractor_id): Path<Uuid>,
) -> ApiResult<Contractor> {
    let contractor = state
        .procurement_queries
        .get_contractor(GetContractor { contractor_id })
        .await?;
    Ok(Json(ApiResponse::success(contractor)))
}

pub async fn list_goods_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<GoodsCategory>> {
    let categories = state.procurement_queries.list_categories(ListGoodsCategories).await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// 按类型列出合同，可用 `?status=` 过滤
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(filter): Query<ContractFilter>,
) -> ApiResult<Vec<ContractView>> {
    let query = ListContracts {
        kind: contract_kind(&kind)?,
        status: filter.status.filter(|s| !s.is_empty()),
    };
    let contracts = state.procurement_queries.list_contracts(query).await?;
    Ok(Json(ApiResponse::success(contracts)))
}

pub async fn get_contract(
    State(state): State<Arc<AppState>>,
    Path((kind, contract_id)): Path<(String, Uuid)>,
) -> ApiResult<ContractView> {
    let contract = state
        .procurement_queries
        .get_contract(GetContract {
            kind: contract_kind(&kind)?,
            contract_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(contract)))
}

// ============================================================================
// Admin handlers
// ============================================================================

pub async fn create_contractor(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ContractorRequest>,
) -> ApiResult<Contractor> {
    let contractor = state
        .contractor_commands
        .create(CreateContractor { input: req.into() })
        .await?;
    Ok(Json(ApiResponse::success(contractor)))
}

pub async fn update_contractor(
    State(state): State<Arc<AppState>>,
    Path(contractor_id): Path<Uuid>,
    JsonBody(req): JsonBody<ContractorRequest>,
) -> ApiResult<Contractor> {
    let contractor = state
        .contractor_commands
        .update(UpdateContractor {
            contractor_id,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(contractor)))
}

pub async fn delete_contractor(
    State(state): State<Arc<AppState>>,
    Path(contractor_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state
        .contractor_commands
        .delete(DeleteContractor { contractor_id })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn create_goods_category(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<GoodsCategoryRequest>,
) -> ApiResult<GoodsCategory> {
    let category = state
        .category_commands
        .create(CreateGoodsCategory { input: req.into() })
        .await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn update_goods_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
    JsonBody(req): JsonBody<GoodsCategoryRequest>,
) -> ApiResult<GoodsCategory> {
    let category = state
        .category_commands
        .update(UpdateGoodsCategory {
            category_id,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn delete_goods_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<Uuid>,
) -> ApiResult<Empty> {
    state
        .category_commands
        .delete(DeleteGoodsCategory { category_id })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn create_contract(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    JsonBody(req): JsonBody<ContractRequest>,
) -> ApiResult<Contract> {
    let contract = state
        .contract_commands
        .create(CreateContract {
            kind: contract_kind(&kind)?,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(contract)))
}

pub async fn update_contract(
    State(state): State<Arc<AppState>>,
    Path((kind, contract_id)): Path<(String, Uuid)>,
    JsonBody(req): JsonBody<ContractRequest>,
) -> ApiResult<Contract> {
    let contract = state
        .contract_commands
        .update(UpdateContract {
            kind: contract_kind(&kind)?,
            contract_id,
            input: req.into(),
        })
        .await?;
    Ok(Json(ApiResponse::success(contract)))
}

pub async fn delete_contract(
    State(state): State<Arc<AppState>>,
    Path((kind, contract_id)): Path<(String, Uuid)>,
) -> ApiResult<Empty> {
    state
        .contract_commands
        .delete(DeleteContract {
            kind: contract_kind(&kind)?,
            contract_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
