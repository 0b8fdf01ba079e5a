//! Results Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ResultsError {
    #[error("字段 {field} 无效: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("无效的指标编码: {0}")]
    InvalidCode(String),

    #[error("数值无效: {0}")]
    InvalidValue(f64),

    #[error("年份无效: {0}")]
    InvalidYear(i32),

    #[error("年度目标重复: {0}")]
    DuplicateTargetYear(i32),
}
