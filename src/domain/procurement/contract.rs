//! Procurement Context - Contract

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProcurementError;
use crate::domain::bounded_text;

/// 合同类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    CivilWorks,
    Goods,
    Consultancy,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::CivilWorks => "civil_works",
            ContractKind::Goods => "goods",
            ContractKind::Consultancy => "consultancy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "civil_works" => Some(ContractKind::CivilWorks),
            "goods" => Some(ContractKind::Goods),
            "consultancy" => Some(ContractKind::Consultancy),
            _ => None,
        }
    }

    /// URL 路径段，如 `/contracts/civil-works`
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContractKind::CivilWorks => "civil-works",
            ContractKind::Goods => "goods",
            ContractKind::Consultancy => "consultancies",
        }
    }

    pub fn from_path_segment(s: &str) -> Result<Self, ProcurementError> {
        match s {
            "civil-works" => Ok(ContractKind::CivilWorks),
            "goods" => Ok(ContractKind::Goods),
            "consultancies" => Ok(ContractKind::Consultancy),
            other => Err(ProcurementError::UnknownKind(other.to_string())),
        }
    }
}

/// 合同状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Planned,
    Ongoing,
    Completed,
    Terminated,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Planned => "planned",
            ContractStatus::Ongoing => "ongoing",
            ContractStatus::Completed => "completed",
            ContractStatus::Terminated => "terminated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(ContractStatus::Planned),
            "ongoing" => Some(ContractStatus::Ongoing),
            "completed" => Some(ContractStatus::Completed),
            "terminated" => Some(ContractStatus::Terminated),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ProcurementError> {
        Self::from_str(s).ok_or_else(|| ProcurementError::UnknownStatus(s.to_string()))
    }
}

impl Default for ContractStatus {
    fn default() -> Self {
        ContractStatus::Ongoing
    }
}

/// 合同草稿
///
/// 引用完整性（承包商、类别是否存在）由应用层检查
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDraft {
    pub kind: ContractKind,
    pub package_no: String,
    pub title: String,
    pub description: String,
    pub contractor_id: Uuid,
    pub category_id: Option<Uuid>,
    pub contract_value: f64,
    pub signing_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub status: ContractStatus,
    pub progress: u8,
}

impl ContractDraft {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: ContractKind,
        package_no: &str,
        title: &str,
        description: &str,
        contractor_id: Uuid,
        category_id: Option<Uuid>,
        contract_value: f64,
        signing_date: NaiveDate,
        completion_date: Option<NaiveDate>,
        status: ContractStatus,
        progress: i64,
    ) -> Result<Self, ProcurementError> {
        let package_no =
            bounded_text(package_no, 64).map_err(|r| ProcurementError::field("package_no", r))?;
        let title = bounded_text(title, 300).map_err(|r| ProcurementError::field("title", r))?;
        let description = description.trim().to_string();

        match (kind, category_id) {
            (ContractKind::Goods, None) => return Err(ProcurementError::CategoryRequired),
            (ContractKind::CivilWorks | ContractKind::Consultancy, Some(_)) => {
                return Err(ProcurementError::CategoryNotAllowed)
            }
            _ => {}
        }

        if !contract_value.is_finite() || contract_value < 0.0 {
            return Err(ProcurementError::InvalidValue(contract_value));
        }

        if let Some(completion) = completion_date {
            if completion < signing_date {
                return Err(ProcurementError::CompletionBeforeSigning);
            }
        }

        if !(0..=100).contains(&progress) {
            return Err(ProcurementError::InvalidProgress(progress));
        }
        // 已完工合同进度固定为 100
        let progress = if status == ContractStatus::Completed {
            100
        } else {
            progress as u8
        };

        Ok(Self {
            kind,
            package_no,
            title,
            description,
            contractor_id,
            category_id,
            contract_value,
            signing_date,
            completion_date,
            status,
            progress,
        })
    }
}

/// 合同
///
/// 不变量:
/// - 同一类型下 package_no 唯一（由仓储保证）
/// - category_id 仅货物合同有值
/// - 类型创建后不可更改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub kind: ContractKind,
    pub package_no: String,
    pub title: String,
    pub description: String,
    pub contractor_id: Uuid,
    pub category_id: Option<Uuid>,
    pub contract_value: f64,
    pub signing_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub status: ContractStatus,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    pub fn new(draft: ContractDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            package_no: draft.package_no,
            title: draft.title,
            description: draft.description,
            contractor_id: draft.contractor_id,
            category_id: draft.category_id,
            contract_value: draft.contract_value,
            signing_date: draft.signing_date,
            completion_date: draft.completion_date,
            status: draft.status,
            progress: draft.progress,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: ContractDraft) {
        self.package_no = draft.package_no;
        self.title = draft.title;
        self.description = draft.description;
        self.contractor_id = draft.contractor_id;
        self.category_id = draft.category_id;
        self.contract_value = draft.contract_value;
        self.signing_date = draft.signing_date;
        self.completion_date = draft.completion_date;
        self.status = draft.status;
        self.progress = draft.progress;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()
    }

    fn draft(
        kind: ContractKind,
        category_id: Option<Uuid>,
        status: ContractStatus,
        progress: i64,
    ) -> Result<ContractDraft, ProcurementError> {
        ContractDraft::new(
            kind,
            "W-01",
            "Upazila Health Complex extension",
            "",
            Uuid::new_v4(),
            category_id,
            1_250_000.0,
            signed(),
            None,
            status,
            progress,
        )
    }

    #[test]
    fn test_goods_requires_category() {
        assert_eq!(
            draft(ContractKind::Goods, None, ContractStatus::Ongoing, 0).unwrap_err(),
            ProcurementError::CategoryRequired
        );
        assert!(draft(ContractKind::Goods, Some(Uuid::new_v4()), ContractStatus::Ongoing, 0).is_ok());
    }

    #[test]
    fn test_non_goods_rejects_category() {
        assert_eq!(
            draft(ContractKind::CivilWorks, Some(Uuid::new_v4()), ContractStatus::Ongoing, 0).unwrap_err(),
            ProcurementError::CategoryNotAllowed
        );
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(
            draft(ContractKind::Consultancy, None, ContractStatus::Ongoing, 101).unwrap_err(),
            ProcurementError::InvalidProgress(101)
        );
        assert!(draft(ContractKind::Consultancy, None, ContractStatus::Ongoing, -1).is_err());
    }

    #[test]
    fn test_completed_forces_full_progress() {
        let d = draft(ContractKind::CivilWorks, None, ContractStatus::Completed, 40).unwrap();
        assert_eq!(d.progress, 100);
    }

    #[test]
    fn test_completion_before_signing_rejected() {
        let err = ContractDraft::new(
            ContractKind::CivilWorks,
            "W-02",
            "Boundary wall",
            "",
            Uuid::new_v4(),
            None,
            10.0,
            signed(),
            NaiveDate::from_ymd_opt(2023, 6, 30),
            ContractStatus::Ongoing,
            10,
        )
        .unwrap_err();
        assert_eq!(err, ProcurementError::CompletionBeforeSigning);
    }

    #[test]
    fn test_negative_or_nan_value_rejected() {
        for value in [-1.0, f64::NAN, f64::INFINITY] {
            let result = ContractDraft::new(
                ContractKind::CivilWorks,
                "W-03",
                "Road",
                "",
                Uuid::new_v4(),
                None,
                value,
                signed(),
                None,
                ContractStatus::Planned,
                0,
            );
            assert!(matches!(result, Err(ProcurementError::InvalidValue(_))));
        }
    }

    #[test]
    fn test_path_segments_round_trip() {
        for kind in [ContractKind::CivilWorks, ContractKind::Goods, ContractKind::Consultancy] {
            assert_eq!(ContractKind::from_path_segment(kind.path_segment()).unwrap(), kind);
            assert_eq!(ContractKind::from_str(kind.as_str()), Some(kind));
        }
        assert!(ContractKind::from_path_segment("works").is_err());
    }
}
