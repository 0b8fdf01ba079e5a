//! Procurement Query Handlers

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ContractRepositoryPort, ContractorRepositoryPort, GoodsCategoryRepositoryPort,
};
use crate::application::queries::{
    GetContract, GetContractor, ListContractors, ListContracts, ListGoodsCategories,
};
use crate::domain::procurement::{Contract, ContractStatus, Contractor, GoodsCategory};

// ============================================================================
// Response DTOs
// ============================================================================

/// 合同视图（附带承包商与类别名称）
#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    #[serde(flatten)]
    pub contract: Contract,
    pub contractor_name: Option<String>,
    pub category_name: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 采购查询处理器
pub struct ProcurementQueryHandler {
    contractor_repo: Arc<dyn ContractorRepositoryPort>,
    category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
    contract_repo: Arc<dyn ContractRepositoryPort>,
}

impl ProcurementQueryHandler {
    pub fn new(
        contractor_repo: Arc<dyn ContractorRepositoryPort>,
        category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
        contract_repo: Arc<dyn ContractRepositoryPort>,
    ) -> Self {
        Self {
            contractor_repo,
            category_repo,
            contract_repo,
        }
    }

    pub async fn get_contractor(&self, query: GetContractor) -> Result<Contractor, ApplicationError> {
        self.contractor_repo
            .find_by_id(query.contractor_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contractor", query.contractor_id))
    }

    pub async fn list_contractors(&self, _query: ListContractors) -> Result<Vec<Contractor>, ApplicationError> {
        Ok(self.contractor_repo.find_all().await?)
    }

    pub async fn list_categories(
        &self,
        _query: ListGoodsCategories,
    ) -> Result<Vec<GoodsCategory>, ApplicationError> {
        Ok(self.category_repo.find_all().await?)
    }

    pub async fn get_contract(&self, query: GetContract) -> Result<ContractView, ApplicationError> {
        let contract = self
            .contract_repo
            .find_by_id(query.contract_id)
            .await?
            .filter(|c| c.kind == query.kind)
            .ok_or_else(|| ApplicationError::not_found("Contract", query.contract_id))?;

        let contractor_name = self
            .contractor_repo
            .find_by_id(contract.contractor_id)
            .await?
            .map(|c| c.name);
        let category_name = match contract.category_id {
            Some(id) => self.category_repo.find_by_id(id).await?.map(|c| c.name),
            None => None,
        };

        Ok(ContractView {
            contract,
            contractor_name,
            category_name,
        })
    }

    pub async fn list_contracts(&self, query: ListContracts) -> Result<Vec<ContractView>, ApplicationError> {
        let status = match query.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(ContractStatus::parse(s)?),
            _ => None,
        };

        let contracts = self.contract_repo.find_by_kind(query.kind, status).await?;
        if contracts.is_empty() {
            return Ok(Vec::new());
        }

        let contractors: HashMap<Uuid, String> = self
            .contractor_repo
            .find_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let categories: HashMap<Uuid, String> = self
            .category_repo
            .find_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(contracts
            .into_iter()
            .map(|contract| ContractView {
                contractor_name: contractors.get(&contract.contractor_id).cloned(),
                category_name: contract
                    .category_id
                    .and_then(|id| categories.get(&id).cloned()),
                contract,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Fixture;
    use crate::domain::procurement::{
        ContractDraft, ContractKind, ContractorDraft, GoodsCategoryDraft,
    };
    use chrono::NaiveDate;

    async fn seed(fx: &Fixture) -> (Contractor, GoodsCategory) {
        let contractor = Contractor::new(
            ContractorDraft::new("Everest Builders", "", "", "01-4412345", None).unwrap(),
        );
        fx.contractor_repo.save(&contractor).await.unwrap();
        let category = GoodsCategory::new(GoodsCategoryDraft::new("Vehicles", "").unwrap());
        fx.category_repo.save(&category).await.unwrap();
        (contractor, category)
    }

    fn contract(
        kind: ContractKind,
        package_no: &str,
        contractor: &Contractor,
        category: Option<&GoodsCategory>,
        status: ContractStatus,
    ) -> Contract {
        Contract::new(
            ContractDraft::new(
                kind,
                package_no,
                "Ambulances",
                "",
                contractor.id,
                category.map(|c| c.id),
                50_000.0,
                NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
                None,
                status,
                10,
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_contracts_with_names_and_status_filter() {
        let fx = Fixture::new().await;
        let (contractor, category) = seed(&fx).await;

        fx.contract_repo
            .save(&contract(ContractKind::Goods, "G-1", &contractor, Some(&category), ContractStatus::Ongoing))
            .await
            .unwrap();
        fx.contract_repo
            .save(&contract(ContractKind::Goods, "G-2", &contractor, Some(&category), ContractStatus::Completed))
            .await
            .unwrap();
        fx.contract_repo
            .save(&contract(ContractKind::CivilWorks, "CW-1", &contractor, None, ContractStatus::Ongoing))
            .await
            .unwrap();

        let handler = ProcurementQueryHandler::new(
            fx.contractor_repo.clone(),
            fx.category_repo.clone(),
            fx.contract_repo.clone(),
        );

        let goods = handler
            .list_contracts(ListContracts {
                kind: ContractKind::Goods,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(goods.len(), 2);
        assert_eq!(goods[0].contractor_name.as_deref(), Some("Everest Builders"));
        assert_eq!(goods[0].category_name.as_deref(), Some("Vehicles"));

        let completed = handler
            .list_contracts(ListContracts {
                kind: ContractKind::Goods,
                status: Some("completed".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].contract.package_no, "G-2");

        let err = handler
            .list_contracts(ListContracts {
                kind: ContractKind::Goods,
                status: Some("bogus".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_get_contract_checks_kind() {
        let fx = Fixture::new().await;
        let (contractor, _) = seed(&fx).await;
        let c = contract(ContractKind::Consultancy, "C-1", &contractor, None, ContractStatus::Planned);
        fx.contract_repo.save(&c).await.unwrap();

        let handler = ProcurementQueryHandler::new(
            fx.contractor_repo.clone(),
            fx.category_repo.clone(),
            fx.contract_repo.clone(),
        );

        let view = handler
            .get_contract(GetContract {
                kind: ContractKind::Consultancy,
                contract_id: c.id,
            })
            .await
            .unwrap();
        assert_eq!(view.contractor_name.as_deref(), Some("Everest Builders"));
        assert!(view.category_name.is_none());

        assert!(handler
            .get_contract(GetContract {
                kind: ContractKind::CivilWorks,
                contract_id: c.id,
            })
            .await
            .is_err());
    }
}
