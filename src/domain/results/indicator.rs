//! Results Context - Indicator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ResultsError;
use crate::domain::bounded_text;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// 年度目标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyTarget {
    pub year: i32,
    pub value: f64,
}

/// 指标草稿
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorDraft {
    pub code: String,
    pub name: String,
    pub unit: String,
    pub baseline_value: f64,
    pub baseline_year: i32,
    pub targets: Vec<YearlyTarget>,
    pub description: String,
}

impl IndicatorDraft {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: &str,
        name: &str,
        unit: &str,
        baseline_value: f64,
        baseline_year: i32,
        mut targets: Vec<YearlyTarget>,
        description: &str,
    ) -> Result<Self, ResultsError> {
        let code = code.trim().to_uppercase();
        let valid_code = !code.is_empty()
            && code.len() <= 32
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));
        if !valid_code {
            return Err(ResultsError::InvalidCode(code));
        }

        let name = bounded_text(name, 300).map_err(|r| ResultsError::InvalidField {
            field: "name",
            reason: r.to_string(),
        })?;
        let unit = unit.trim().to_string();

        check_value(baseline_value)?;
        check_year(baseline_year)?;

        for target in &targets {
            check_value(target.value)?;
            check_year(target.year)?;
        }
        targets.sort_by_key(|t| t.year);
        if let Some(pair) = targets.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(ResultsError::DuplicateTargetYear(pair[0].year));
        }

        Ok(Self {
            code,
            name,
            unit,
            baseline_value,
            baseline_year,
            targets,
            description: description.trim().to_string(),
        })
    }
}

pub(crate) fn check_value(value: f64) -> Result<(), ResultsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ResultsError::InvalidValue(value))
    }
}

fn check_year(year: i32) -> Result<(), ResultsError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ResultsError::InvalidYear(year))
    }
}

/// 结果框架指标
///
/// 不变量:
/// - code 唯一（由仓储保证）
/// - targets 按年份升序且年份不重复
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub unit: String,
    pub baseline_value: f64,
    pub baseline_year: i32,
    pub targets: Vec<YearlyTarget>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Indicator {
    pub fn new(draft: IndicatorDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: draft.code,
            name: draft.name,
            unit: draft.unit,
            baseline_value: draft.baseline_value,
            baseline_year: draft.baseline_year,
            targets: draft.targets,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: IndicatorDraft) {
        self.code = draft.code;
        self.name = draft.name;
        self.unit = draft.unit;
        self.baseline_value = draft.baseline_value;
        self.baseline_year = draft.baseline_year;
        self.targets = draft.targets;
        self.description = draft.description;
        self.updated_at = Utc::now();
    }

    /// 指定年份的目标值
    pub fn target_for(&self, year: i32) -> Option<f64> {
        self.targets.iter().find(|t| t.year == year).map(|t| t.value)
    }
}

/// 指标进度报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: Uuid,
    pub indicator_id: Uuid,
    pub reported_on: NaiveDate,
    pub value: f64,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
}

impl StatusUpdate {
    pub fn new(
        indicator_id: Uuid,
        reported_on: NaiveDate,
        value: f64,
        remarks: &str,
    ) -> Result<Self, ResultsError> {
        check_value(value)?;
        Ok(Self {
            id: Uuid::new_v4(),
            indicator_id,
            reported_on,
            value,
            remarks: remarks.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}
