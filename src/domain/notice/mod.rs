//! Notice Context - 公告限界上下文
//!
//! 公告内容三选一：PDF 文档、外部链接、子公告列表

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{Notice, NoticeDraft, SubNotice};
pub use errors::NoticeError;
pub use value_objects::{NoticeBody, NoticeKind, NoticeLink};
