//! Indicator Commands

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::results::YearlyTarget;

/// 指标输入
#[derive(Debug, Clone)]
pub struct IndicatorInput {
    pub code: String,
    pub name: String,
    pub unit: String,
    pub baseline_value: f64,
    pub baseline_year: i32,
    pub targets: Vec<YearlyTarget>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CreateIndicator {
    pub input: IndicatorInput,
}

#[derive(Debug, Clone)]
pub struct UpdateIndicator {
    pub indicator_id: Uuid,
    pub input: IndicatorInput,
}

/// 删除指标命令（连同进度报告）
#[derive(Debug, Clone)]
pub struct DeleteIndicator {
    pub indicator_id: Uuid,
}

/// 添加进度报告命令
#[derive(Debug, Clone)]
pub struct AddStatusUpdate {
    pub indicator_id: Uuid,
    pub reported_on: NaiveDate,
    pub value: f64,
    pub remarks: String,
}

/// 删除进度报告命令
#[derive(Debug, Clone)]
pub struct RemoveStatusUpdate {
    pub indicator_id: Uuid,
    pub update_id: Uuid,
}
