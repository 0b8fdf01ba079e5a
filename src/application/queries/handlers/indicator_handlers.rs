//! Indicator Query Handlers

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::IndicatorRepositoryPort;
use crate::application::queries::{GetIndicator, ListIndicators};
use crate::domain::results::{Indicator, IndicatorProgress, StatusUpdate};

/// 指标列表项
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorView {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub progress: IndicatorProgress,
}

/// 指标详情
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorDetail {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub progress: IndicatorProgress,
    /// 按报告日期倒序
    pub updates: Vec<StatusUpdate>,
}

/// 指标查询处理器
pub struct IndicatorQueryHandler {
    indicator_repo: Arc<dyn IndicatorRepositoryPort>,
}

impl IndicatorQueryHandler {
    pub fn new(indicator_repo: Arc<dyn IndicatorRepositoryPort>) -> Self {
        Self { indicator_repo }
    }

    pub async fn get(&self, query: GetIndicator) -> Result<IndicatorDetail, ApplicationError> {
        let indicator = self
            .indicator_repo
            .find_by_id(query.indicator_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Indicator", query.indicator_id))?;

        let updates = self.indicator_repo.find_updates(indicator.id).await?;
        let progress = IndicatorProgress::compute(&indicator, &updates);

        Ok(IndicatorDetail {
            indicator,
            progress,
            updates,
        })
    }

    pub async fn list(&self, _query: ListIndicators) -> Result<Vec<IndicatorView>, ApplicationError> {
        let indicators = self.indicator_repo.find_all().await?;

        let mut by_indicator: HashMap<Uuid, Vec<StatusUpdate>> = HashMap::new();
        for update in self.indicator_repo.find_all_updates().await? {
            by_indicator.entry(update.indicator_id).or_default().push(update);
        }

        Ok(indicators
            .into_iter()
            .map(|indicator| {
                let updates = by_indicator.get(&indicator.id).map(Vec::as_slice).unwrap_or(&[]);
                let progress = IndicatorProgress::compute(&indicator, updates);
                IndicatorView { indicator, progress }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Fixture;
    use crate::domain::results::{IndicatorDraft, YearlyTarget};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_list_computes_progress() {
        let fx = Fixture::new().await;
        let indicator = Indicator::new(
            IndicatorDraft::new(
                "IRI-2",
                "Facilities with trained staff",
                "count",
                10.0,
                2021,
                vec![YearlyTarget { year: 2024, value: 30.0 }],
                "",
            )
            .unwrap(),
        );
        fx.indicator_repo.save(&indicator).await.unwrap();
        let idle = Indicator::new(
            IndicatorDraft::new("IRI-3", "Idle", "count", 0.0, 2021, Vec::new(), "").unwrap(),
        );
        fx.indicator_repo.save(&idle).await.unwrap();

        for (month, value) in [(3, 15.0), (9, 20.0)] {
            let update = StatusUpdate::new(
                indicator.id,
                NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
                value,
                "",
            )
            .unwrap();
            fx.indicator_repo.save_update(&update).await.unwrap();
        }

        let handler = IndicatorQueryHandler::new(fx.indicator_repo.clone());
        let list = handler.list(ListIndicators).await.unwrap();
        assert_eq!(list.len(), 2);

        let with_updates = list.iter().find(|v| v.indicator.code == "IRI-2").unwrap();
        assert_eq!(with_updates.progress.latest_value, Some(20.0));
        assert_eq!(with_updates.progress.achievement_percent, Some(50.0));

        let idle_view = list.iter().find(|v| v.indicator.code == "IRI-3").unwrap();
        assert!(idle_view.progress.latest_value.is_none());

        let detail = handler
            .get(GetIndicator {
                indicator_id: indicator.id,
            })
            .await
            .unwrap();
        assert_eq!(detail.updates.len(), 2);
        assert_eq!(detail.updates[0].value, 20.0);
    }
}
