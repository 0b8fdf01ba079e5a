//! Procurement Commands

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::procurement::ContractKind;

/// 承包商输入
#[derive(Debug, Clone)]
pub struct ContractorInput {
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateContractor {
    pub input: ContractorInput,
}

#[derive(Debug, Clone)]
pub struct UpdateContractor {
    pub contractor_id: Uuid,
    pub input: ContractorInput,
}

/// 删除承包商命令（仍被合同引用时拒绝）
#[derive(Debug, Clone)]
pub struct DeleteContractor {
    pub contractor_id: Uuid,
}

/// 货物类别输入
#[derive(Debug, Clone)]
pub struct GoodsCategoryInput {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CreateGoodsCategory {
    pub input: GoodsCategoryInput,
}

#[derive(Debug, Clone)]
pub struct UpdateGoodsCategory {
    pub category_id: Uuid,
    pub input: GoodsCategoryInput,
}

/// 删除货物类别命令（仍被货物合同引用时拒绝）
#[derive(Debug, Clone)]
pub struct DeleteGoodsCategory {
    pub category_id: Uuid,
}

/// 合同输入
#[derive(Debug, Clone)]
pub struct ContractInput {
    pub package_no: String,
    pub title: String,
    pub description: String,
    pub contractor_id: Uuid,
    pub category_id: Option<Uuid>,
    pub contract_value: f64,
    pub signing_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    /// 缺省为 ongoing
    pub status: Option<String>,
    pub progress: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CreateContract {
    pub kind: ContractKind,
    pub input: ContractInput,
}

#[derive(Debug, Clone)]
pub struct UpdateContract {
    pub kind: ContractKind,
    pub contract_id: Uuid,
    pub input: ContractInput,
}

#[derive(Debug, Clone)]
pub struct DeleteContract {
    pub kind: ContractKind,
    pub contract_id: Uuid,
}
