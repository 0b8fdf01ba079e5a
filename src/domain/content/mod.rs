//! Content Context - 内容限界上下文
//!
//! 职责:
//! - 静态页面（富文本 + 页面构建器数据）
//! - 新闻条目（封面与图集）

mod errors;
mod news;
mod page;
mod value_objects;

pub use errors::ContentError;
pub use news::{NewsDraft, NewsItem, MAX_GALLERY_IMAGES, MAX_SUMMARY_CHARS};
pub use page::{Page, PageDraft};
pub use value_objects::{Slug, Title};
