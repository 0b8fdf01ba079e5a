//! Procurement Context - 采购限界上下文
//!
//! 职责:
//! - 承包商登记
//! - 货物类别
//! - 土建、货物、咨询三类合同

mod contract;
mod contractor;
mod errors;

pub use contract::{Contract, ContractDraft, ContractKind, ContractStatus};
pub use contractor::{Contractor, ContractorDraft, GoodsCategory, GoodsCategoryDraft};
pub use errors::ProcurementError;
