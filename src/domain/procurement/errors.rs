//! Procurement Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ProcurementError {
    #[error("字段 {field} 无效: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("未知的合同类型: {0}")]
    UnknownKind(String),

    #[error("未知的合同状态: {0}")]
    UnknownStatus(String),

    #[error("合同金额无效: {0}")]
    InvalidValue(f64),

    #[error("进度必须在 0 到 100 之间: {0}")]
    InvalidProgress(i64),

    #[error("完工日期早于签约日期")]
    CompletionBeforeSigning,

    #[error("货物合同必须指定类别")]
    CategoryRequired,

    #[error("只有货物合同可以指定类别")]
    CategoryNotAllowed,
}

impl ProcurementError {
    pub(crate) fn field(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }
}
