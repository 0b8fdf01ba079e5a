//! Domain Layer - 领域层
//!
//! 包含五个限界上下文:
//! - Content Context: 页面与新闻
//! - Notice Context: 公告（文档 / 链接 / 子公告）
//! - Procurement Context: 承包商、合同、货物类别
//! - Results Context: 结果框架指标与进度
//! - Identity Context: 管理员账号与密码哈希

pub mod content;
pub mod identity;
pub mod notice;
pub mod procurement;
pub mod results;

mod text;

pub use text::{bounded_text, TextRule};
