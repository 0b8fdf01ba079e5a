//! Procurement Queries

use uuid::Uuid;

use crate::domain::procurement::ContractKind;

#[derive(Debug, Clone)]
pub struct GetContractor {
    pub contractor_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListContractors;

#[derive(Debug, Clone)]
pub struct ListGoodsCategories;

#[derive(Debug, Clone)]
pub struct GetContract {
    pub kind: ContractKind,
    pub contract_id: Uuid,
}

/// 按类型列出合同，status 为空时不过滤
#[derive(Debug, Clone)]
pub struct ListContracts {
    pub kind: ContractKind,
    pub status: Option<String>,
}
