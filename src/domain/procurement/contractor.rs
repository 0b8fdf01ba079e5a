//! Procurement Context - Contractor & Goods Category

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProcurementError;
use crate::domain::bounded_text;

/// 承包商草稿
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorDraft {
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
}

impl ContractorDraft {
    pub fn new(
        name: &str,
        address: &str,
        contact_person: &str,
        phone: &str,
        email: Option<&str>,
    ) -> Result<Self, ProcurementError> {
        let name = bounded_text(name, 200).map_err(|r| ProcurementError::field("name", r))?;
        let address = optional_text(address, 500).map_err(|r| ProcurementError::field("address", r))?;
        let contact_person =
            optional_text(contact_person, 200).map_err(|r| ProcurementError::field("contact_person", r))?;
        let phone = phone.trim().to_string();
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
        {
            return Err(ProcurementError::field("phone", phone));
        }

        let email = email.map(str::trim).filter(|e| !e.is_empty()).map(str::to_string);
        if let Some(email) = &email {
            let valid = email
                .split_once('@')
                .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
                .unwrap_or(false);
            if !valid {
                return Err(ProcurementError::field("email", email));
            }
        }

        Ok(Self {
            name,
            address,
            contact_person,
            phone,
            email,
        })
    }
}

/// 可为空的文本：空白视为空串，非空时限制长度
fn optional_text(value: &str, max_chars: usize) -> Result<String, crate::domain::TextRule> {
    if value.trim().is_empty() {
        Ok(String::new())
    } else {
        bounded_text(value, max_chars)
    }
}

/// 承包商
///
/// 不变量:
/// - 名称不区分大小写唯一（由仓储保证）
/// - 仍被合同引用时不可删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contractor {
    pub fn new(draft: ContractorDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            address: draft.address,
            contact_person: draft.contact_person,
            phone: draft.phone,
            email: draft.email,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: ContractorDraft) {
        self.name = draft.name;
        self.address = draft.address;
        self.contact_person = draft.contact_person;
        self.phone = draft.phone;
        self.email = draft.email;
        self.updated_at = Utc::now();
    }
}

/// 货物类别草稿
#[derive(Debug, Clone, PartialEq)]
pub struct GoodsCategoryDraft {
    pub name: String,
    pub description: String,
}

impl GoodsCategoryDraft {
    pub fn new(name: &str, description: &str) -> Result<Self, ProcurementError> {
        Ok(Self {
            name: bounded_text(name, 120).map_err(|r| ProcurementError::field("name", r))?,
            description: optional_text(description, 1000)
                .map_err(|r| ProcurementError::field("description", r))?,
        })
    }
}

/// 货物类别
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl GoodsCategory {
    pub fn new(draft: GoodsCategoryDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, draft: GoodsCategoryDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }
}
