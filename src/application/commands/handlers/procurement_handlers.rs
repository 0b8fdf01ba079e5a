//! Procurement Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    ContractInput, ContractorInput, CreateContract, CreateContractor, CreateGoodsCategory,
    DeleteContract, DeleteContractor, DeleteGoodsCategory, UpdateContract, UpdateContractor,
    UpdateGoodsCategory,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ContractRepositoryPort, ContractorRepositoryPort, GoodsCategoryRepositoryPort,
};
use crate::domain::procurement::{
    Contract, ContractDraft, ContractKind, ContractStatus, Contractor, ContractorDraft,
    GoodsCategory, GoodsCategoryDraft,
};

// ============================================================================
// Contractor
// ============================================================================

/// 承包商命令处理器
pub struct ContractorCommandHandler {
    contractor_repo: Arc<dyn ContractorRepositoryPort>,
    contract_repo: Arc<dyn ContractRepositoryPort>,
}

impl ContractorCommandHandler {
    pub fn new(
        contractor_repo: Arc<dyn ContractorRepositoryPort>,
        contract_repo: Arc<dyn ContractRepositoryPort>,
    ) -> Self {
        Self {
            contractor_repo,
            contract_repo,
        }
    }

    pub async fn create(&self, command: CreateContractor) -> Result<Contractor, ApplicationError> {
        let contractor = Contractor::new(contractor_draft(&command.input)?);
        self.contractor_repo.save(&contractor).await?;

        tracing::info!(contractor_id = %contractor.id, name = %contractor.name, "Contractor created");

        Ok(contractor)
    }

    pub async fn update(&self, command: UpdateContractor) -> Result<Contractor, ApplicationError> {
        let mut contractor = self
            .contractor_repo
            .find_by_id(command.contractor_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contractor", command.contractor_id))?;

        contractor.apply(contractor_draft(&command.input)?);
        self.contractor_repo.save(&contractor).await?;

        tracing::info!(contractor_id = %contractor.id, "Contractor updated");

        Ok(contractor)
    }

    /// 仍被合同引用的承包商不能删除
    pub async fn delete(&self, command: DeleteContractor) -> Result<(), ApplicationError> {
        let contractor = self
            .contractor_repo
            .find_by_id(command.contractor_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contractor", command.contractor_id))?;

        let references = self.contract_repo.count_by_contractor(contractor.id).await?;
        if references > 0 {
            return Err(ApplicationError::conflict(format!(
                "Contractor {} is referenced by {} contract(s)",
                contractor.name, references
            )));
        }

        self.contractor_repo.delete(contractor.id).await?;

        tracing::info!(contractor_id = %contractor.id, "Contractor deleted");

        Ok(())
    }
}

fn contractor_draft(input: &ContractorInput) -> Result<ContractorDraft, ApplicationError> {
    Ok(ContractorDraft::new(
        &input.name,
        &input.address,
        &input.contact_person,
        &input.phone,
        input.email.as_deref(),
    )?)
}

// ============================================================================
// Goods Category
// ============================================================================

/// 货物类别命令处理器
pub struct GoodsCategoryCommandHandler {
    category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
    contract_repo: Arc<dyn ContractRepositoryPort>,
}

impl GoodsCategoryCommandHandler {
    pub fn new(
        category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
        contract_repo: Arc<dyn ContractRepositoryPort>,
    ) -> Self {
        Self {
            category_repo,
            contract_repo,
        }
    }

    pub async fn create(&self, command: CreateGoodsCategory) -> Result<GoodsCategory, ApplicationError> {
        let draft = GoodsCategoryDraft::new(&command.input.name, &command.input.description)?;
        let category = GoodsCategory::new(draft);
        self.category_repo.save(&category).await?;

        tracing::info!(category_id = %category.id, name = %category.name, "Goods category created");

        Ok(category)
    }

    pub async fn update(&self, command: UpdateGoodsCategory) -> Result<GoodsCategory, ApplicationError> {
        let mut category = self
            .category_repo
            .find_by_id(command.category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("GoodsCategory", command.category_id))?;

        category.apply(GoodsCategoryDraft::new(
            &command.input.name,
            &command.input.description,
        )?);
        self.category_repo.save(&category).await?;

        tracing::info!(category_id = %category.id, "Goods category updated");

        Ok(category)
    }

    pub async fn delete(&self, command: DeleteGoodsCategory) -> Result<(), ApplicationError> {
        let category = self
            .category_repo
            .find_by_id(command.category_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("GoodsCategory", command.category_id))?;

        let references = self.contract_repo.count_by_category(category.id).await?;
        if references > 0 {
            return Err(ApplicationError::conflict(format!(
                "Goods category {} is referenced by {} contract(s)",
                category.name, references
            )));
        }

        self.category_repo.delete(category.id).await?;

        tracing::info!(category_id = %category.id, "Goods category deleted");

        Ok(())
    }
}

// ============================================================================
// Contract
// ============================================================================

/// 合同命令处理器（三类合同共用）
pub struct ContractCommandHandler {
    contract_repo: Arc<dyn ContractRepositoryPort>,
    contractor_repo: Arc<dyn ContractorRepositoryPort>,
    category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
}

impl ContractCommandHandler {
    pub fn new(
        contract_repo: Arc<dyn ContractRepositoryPort>,
        contractor_repo: Arc<dyn ContractorRepositoryPort>,
        category_repo: Arc<dyn GoodsCategoryRepositoryPort>,
    ) -> Self {
        Self {
            contract_repo,
            contractor_repo,
            category_repo,
        }
    }

    pub async fn create(&self, command: CreateContract) -> Result<Contract, ApplicationError> {
        let draft = self.contract_draft(command.kind, command.input).await?;
        let contract = Contract::new(draft);
        self.contract_repo.save(&contract).await?;

        tracing::info!(
            contract_id = %contract.id,
            kind = contract.kind.as_str(),
            package_no = %contract.package_no,
            "Contract created"
        );

        Ok(contract)
    }

    pub async fn update(&self, command: UpdateContract) -> Result<Contract, ApplicationError> {
        let mut contract = self.load(command.kind, command.contract_id).await?;

        let draft = self.contract_draft(command.kind, command.input).await?;
        contract.apply(draft);
        self.contract_repo.save(&contract).await?;

        tracing::info!(
            contract_id = %contract.id,
            status = contract.status.as_str(),
            progress = contract.progress,
            "Contract updated"
        );

        Ok(contract)
    }

    pub async fn delete(&self, command: DeleteContract) -> Result<(), ApplicationError> {
        let contract = self.load(command.kind, command.contract_id).await?;
        self.contract_repo.delete(contract.id).await?;

        tracing::info!(contract_id = %contract.id, kind = contract.kind.as_str(), "Contract deleted");

        Ok(())
    }

    /// 合同类型不匹配时视为不存在
    async fn load(&self, kind: ContractKind, id: Uuid) -> Result<Contract, ApplicationError> {
        self.contract_repo
            .find_by_id(id)
            .await?
            .filter(|c| c.kind == kind)
            .ok_or_else(|| ApplicationError::not_found("Contract", id))
    }

    async fn contract_draft(
        &self,
        kind: ContractKind,
        input: ContractInput,
    ) -> Result<ContractDraft, ApplicationError> {
        let status = match input.status.as_deref() {
            Some(s) if !s.trim().is_empty() => ContractStatus::parse(s.trim())?,
            _ => ContractStatus::default(),
        };

        let draft = ContractDraft::new(
            kind,
            &input.package_no,
            &input.title,
            &input.description,
            input.contractor_id,
            input.category_id,
            input.contract_value,
            input.signing_date,
            input.completion_date,
            status,
            input.progress.unwrap_or(0),
        )?;

        if self.contractor_repo.find_by_id(draft.contractor_id).await?.is_none() {
            return Err(ApplicationError::validation(format!(
                "Unknown contractor: {}",
                draft.contractor_id
            )));
        }
        if let Some(category_id) = draft.category_id {
            if self.category_repo.find_by_id(category_id).await?.is_none() {
                return Err(ApplicationError::validation(format!(
                    "Unknown goods category: {}",
                    category_id
                )));
            }
        }

        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::GoodsCategoryInput;
    use crate::application::testing::Fixture;
    use chrono::NaiveDate;

    struct Handlers {
        contractors: ContractorCommandHandler,
        categories: GoodsCategoryCommandHandler,
        contracts: ContractCommandHandler,
    }

    fn handlers(fx: &Fixture) -> Handlers {
        Handlers {
            contractors: ContractorCommandHandler::new(fx.contractor_repo.clone(), fx.contract_repo.clone()),
            categories: GoodsCategoryCommandHandler::new(fx.category_repo.clone(), fx.contract_repo.clone()),
            contracts: ContractCommandHandler::new(
                fx.contract_repo.clone(),
                fx.contractor_repo.clone(),
                fx.category_repo.clone(),
            ),
        }
    }

    fn contractor_input(name: &str) -> ContractorInput {
        ContractorInput {
            name: name.to_string(),
            address: "12 Main Road".to_string(),
            contact_person: "R. Sharma".to_string(),
            phone: "+977 1 4412345".to_string(),
            email: Some("info@builders.example.com".to_string()),
        }
    }

    fn contract_input(contractor_id: Uuid, category_id: Option<Uuid>) -> ContractInput {
        ContractInput {
            package_no: "HSP/CW/01".to_string(),
            title: "District hospital extension".to_string(),
            description: String::new(),
            contractor_id,
            category_id,
            contract_value: 1_250_000.0,
            signing_date: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            completion_date: None,
            status: None,
            progress: Some(35),
        }
    }

    #[tokio::test]
    async fn test_contract_requires_known_contractor() {
        let fx = Fixture::new().await;
        let h = handlers(&fx);

        let err = h
            .contracts
            .create(CreateContract {
                kind: ContractKind::CivilWorks,
                input: contract_input(Uuid::new_v4(), None),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_goods_contract_with_category() {
        let fx = Fixture::new().await;
        let h = handlers(&fx);

        let contractor = h
            .contractors
            .create(CreateContractor {
                input: contractor_input("Himal Suppliers"),
            })
            .await
            .unwrap();
        let category = h
            .categories
            .create(CreateGoodsCategory {
                input: GoodsCategoryInput {
                    name: "Medical equipment".to_string(),
                    description: String::new(),
                },
            })
            .await
            .unwrap();

        let mut input = contract_input(contractor.id, Some(category.id));
        input.status = Some("completed".to_string());
        let contract = h
            .contracts
            .create(CreateContract {
                kind: ContractKind::Goods,
                input,
            })
            .await
            .unwrap();
        assert_eq!(contract.status, ContractStatus::Completed);
        assert_eq!(contract.progress, 100);

        // 被引用时不可删除
        let err = h
            .categories
            .delete(DeleteGoodsCategory {
                category_id: category.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        let err = h
            .contractors
            .delete(DeleteContractor {
                contractor_id: contractor.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        h.contracts
            .delete(DeleteContract {
                kind: ContractKind::Goods,
                contract_id: contract.id,
            })
            .await
            .unwrap();
        h.contractors
            .delete(DeleteContractor {
                contractor_id: contractor.id,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_contract_kind_mismatch_is_not_found() {
        let fx = Fixture::new().await;
        let h = handlers(&fx);

        let contractor = h
            .contractors
            .create(CreateContractor {
                input: contractor_input("Everest Builders"),
            })
            .await
            .unwrap();
        let contract = h
            .contracts
            .create(CreateContract {
                kind: ContractKind::CivilWorks,
                input: contract_input(contractor.id, None),
            })
            .await
            .unwrap();

        let err = h
            .contracts
            .update(UpdateContract {
                kind: ContractKind::Consultancy,
                contract_id: contract.id,
                input: contract_input(contractor.id, None),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_package_number_conflicts() {
        let fx = Fixture::new().await;
        let h = handlers(&fx);

        let contractor = h
            .contractors
            .create(CreateContractor {
                input: contractor_input("Everest Builders"),
            })
            .await
            .unwrap();
        h.contracts
            .create(CreateContract {
                kind: ContractKind::CivilWorks,
                input: contract_input(contractor.id, None),
            })
            .await
            .unwrap();

        let err = h
            .contracts
            .create(CreateContract {
                kind: ContractKind::CivilWorks,
                input: contract_input(contractor.id, None),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        // 不同类型可以复用编号
        let result = h
            .contracts
            .create(CreateContract {
                kind: ContractKind::Consultancy,
                input: contract_input(contractor.id, None),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_contractor_name_is_unique_ignoring_case() {
        let fx = Fixture::new().await;
        let h = handlers(&fx);

        h.contractors
            .create(CreateContractor {
                input: contractor_input("Everest Builders"),
            })
            .await
            .unwrap();
        let err = h
            .contractors
            .create(CreateContractor {
                input: contractor_input("EVEREST builders"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected() {
        let fx = Fixture::new().await;
        let h = handlers(&fx);

        let contractor = h
            .contractors
            .create(CreateContractor {
                input: contractor_input("Everest Builders"),
            })
            .await
            .unwrap();
        let mut input = contract_input(contractor.id, None);
        input.status = Some("paused".to_string());
        let err = h
            .contracts
            .create(CreateContract {
                kind: ContractKind::CivilWorks,
                input,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}
