//! Indicator Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    AddStatusUpdate, CreateIndicator, DeleteIndicator, IndicatorInput, RemoveStatusUpdate,
    UpdateIndicator,
};
use crate::application::error::ApplicationError;
use crate::application::ports::IndicatorRepositoryPort;
use crate::domain::results::{Indicator, IndicatorDraft, StatusUpdate};

/// 结果框架指标命令处理器
pub struct IndicatorCommandHandler {
    indicator_repo: Arc<dyn IndicatorRepositoryPort>,
}

impl IndicatorCommandHandler {
    pub fn new(indicator_repo: Arc<dyn IndicatorRepositoryPort>) -> Self {
        Self { indicator_repo }
    }

    pub async fn create(&self, command: CreateIndicator) -> Result<Indicator, ApplicationError> {
        let indicator = Indicator::new(indicator_draft(command.input)?);
        self.indicator_repo.save(&indicator).await?;

        tracing::info!(
            indicator_id = %indicator.id,
            code = %indicator.code,
            targets = indicator.targets.len(),
            "Indicator created"
        );

        Ok(indicator)
    }

    pub async fn update(&self, command: UpdateIndicator) -> Result<Indicator, ApplicationError> {
        let mut indicator = self
            .indicator_repo
            .find_by_id(command.indicator_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Indicator", command.indicator_id))?;

        indicator.apply(indicator_draft(command.input)?);
        self.indicator_repo.save(&indicator).await?;

        tracing::info!(indicator_id = %indicator.id, code = %indicator.code, "Indicator updated");

        Ok(indicator)
    }

    /// 删除指标及其全部进度报告
    pub async fn delete(&self, command: DeleteIndicator) -> Result<(), ApplicationError> {
        let indicator = self
            .indicator_repo
            .find_by_id(command.indicator_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Indicator", command.indicator_id))?;

        self.indicator_repo.delete(indicator.id).await?;

        tracing::info!(indicator_id = %indicator.id, code = %indicator.code, "Indicator deleted");

        Ok(())
    }

    pub async fn add_update(&self, command: AddStatusUpdate) -> Result<StatusUpdate, ApplicationError> {
        let indicator = self
            .indicator_repo
            .find_by_id(command.indicator_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Indicator", command.indicator_id))?;

        let update = StatusUpdate::new(
            indicator.id,
            command.reported_on,
            command.value,
            &command.remarks,
        )?;
        self.indicator_repo.save_update(&update).await?;

        tracing::info!(
            indicator_id = %indicator.id,
            update_id = %update.id,
            reported_on = %update.reported_on,
            "Status update recorded"
        );

        Ok(update)
    }

    pub async fn remove_update(&self, command: RemoveStatusUpdate) -> Result<(), ApplicationError> {
        let update = self
            .indicator_repo
            .find_update(command.update_id)
            .await?
            .filter(|u| u.indicator_id == command.indicator_id)
            .ok_or_else(|| ApplicationError::not_found("StatusUpdate", command.update_id))?;

        self.indicator_repo.delete_update(update.id).await?;

        tracing::info!(
            indicator_id = %update.indicator_id,
            update_id = %update.id,
            "Status update removed"
        );

        Ok(())
    }
}

fn indicator_draft(input: IndicatorInput) -> Result<IndicatorDraft, ApplicationError> {
    Ok(IndicatorDraft::new(
        &input.code,
        &input.name,
        &input.unit,
        input.baseline_value,
        input.baseline_year,
        input.targets,
        &input.description,
    )?)
}
