//! Results Context - 结果框架限界上下文
//!
//! 指标、年度目标、定期进度报告

mod errors;
mod indicator;
mod progress;

pub use errors::ResultsError;
pub use indicator::{Indicator, IndicatorDraft, StatusUpdate, YearlyTarget};
pub use progress::IndicatorProgress;
