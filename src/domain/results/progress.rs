//! Results Context - Progress

use chrono::Datelike;
use serde::Serialize;

use super::{Indicator, StatusUpdate};

/// 指标进度摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorProgress {
    /// 最近一次报告值
    pub latest_value: Option<f64>,
    /// 最近一次报告的年份
    pub latest_year: Option<i32>,
    /// 该年份的目标值
    pub target_value: Option<f64>,
    /// 相对基线的完成百分比
    pub achievement_percent: Option<f64>,
}

impl IndicatorProgress {
    /// 根据进度报告计算摘要
    ///
    /// 完成度 = (最新值 - 基线) / (目标 - 基线) * 100；
    /// 无目标或目标等于基线时为 None
    pub fn compute(indicator: &Indicator, updates: &[StatusUpdate]) -> Self {
        let latest = updates
            .iter()
            .max_by(|a, b| {
                a.reported_on
                    .cmp(&b.reported_on)
                    .then(a.created_at.cmp(&b.created_at))
            });

        let Some(latest) = latest else {
            return Self {
                latest_value: None,
                latest_year: None,
                target_value: None,
                achievement_percent: None,
            };
        };

        let year = latest.reported_on.year();
        let target_value = indicator.target_for(year);
        let achievement_percent = target_value.and_then(|target| {
            let span = target - indicator.baseline_value;
            if span == 0.0 {
                None
            } else {
                let percent = (latest.value - indicator.baseline_value) / span * 100.0;
                Some((percent * 100.0).round() / 100.0)
            }
        });

        Self {
            latest_value: Some(latest.value),
            latest_year: Some(year),
            target_value,
            achievement_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::results::{IndicatorDraft, YearlyTarget};
    use chrono::NaiveDate;

    fn indicator() -> Indicator {
        Indicator::new(
            IndicatorDraft::new(
                "PDO-1",
                "Facility deliveries",
                "%",
                30.0,
                2022,
                vec![
                    YearlyTarget { year: 2023, value: 40.0 },
                    YearlyTarget { year: 2024, value: 50.0 },
                ],
                "",
            )
            .unwrap(),
        )
    }

    fn update(indicator: &Indicator, y: i32, m: u32, value: f64) -> StatusUpdate {
        StatusUpdate::new(
            indicator.id,
            NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            value,
            "",
        )
        .unwrap()
    }

    #[test]
    fn test_no_updates() {
        let progress = IndicatorProgress::compute(&indicator(), &[]);
        assert_eq!(progress.latest_value, None);
        assert_eq!(progress.achievement_percent, None);
    }

    #[test]
    fn test_uses_latest_report() {
        let ind = indicator();
        let updates = vec![
            update(&ind, 2024, 6, 45.0),
            update(&ind, 2023, 12, 39.0),
        ];
        let progress = IndicatorProgress::compute(&ind, &updates);
        assert_eq!(progress.latest_value, Some(45.0));
        assert_eq!(progress.latest_year, Some(2024));
        assert_eq!(progress.target_value, Some(50.0));
        assert_eq!(progress.achievement_percent, Some(75.0));
    }

    #[test]
    fn test_no_target_for_year() {
        let ind = indicator();
        let progress = IndicatorProgress::compute(&ind, &[update(&ind, 2026, 1, 60.0)]);
        assert_eq!(progress.target_value, None);
        assert_eq!(progress.achievement_percent, None);
    }

    #[test]
    fn test_decreasing_indicator() {
        // 目标低于基线（如缺货率）
        let ind = Indicator::new(
            IndicatorDraft::new(
                "IRI-3",
                "Stock-out rate",
                "%",
                20.0,
                2022,
                vec![YearlyTarget { year: 2024, value: 10.0 }],
                "",
            )
            .unwrap(),
        );
        let progress = IndicatorProgress::compute(&ind, &[update(&ind, 2024, 3, 15.0)]);
        assert_eq!(progress.achievement_percent, Some(50.0));
    }

    #[test]
    fn test_target_equal_to_baseline() {
        // 目标与基线相同时无法计算完成度
        let ind = Indicator::new(
            IndicatorDraft::new(
                "IRI-5",
                "Trained staff",
                "persons",
                40.0,
                2022,
                vec![YearlyTarget { year: 2024, value: 40.0 }],
                "",
            )
            .unwrap(),
        );
        let progress = IndicatorProgress::compute(&ind, &[update(&ind, 2024, 5, 42.0)]);
        assert_eq!(progress.latest_value, Some(42.0));
        assert_eq!(progress.target_value, Some(40.0));
        assert_eq!(progress.achievement_percent, None);
    }
}
