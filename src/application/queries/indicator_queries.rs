//! Indicator Queries

use uuid::Uuid;

/// 获取指标详情（含全部进度报告）
#[derive(Debug, Clone)]
pub struct GetIndicator {
    pub indicator_id: Uuid,
}

/// 指标列表（含进度摘要）
#[derive(Debug, Clone)]
pub struct ListIndicators;
