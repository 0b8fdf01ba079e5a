//! Content Context - News

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ContentError, Slug, Title};
use crate::domain::bounded_text;

/// 摘要最大字符数
pub const MAX_SUMMARY_CHARS: usize = 500;

/// 图集最多图片数
pub const MAX_GALLERY_IMAGES: usize = 50;

/// 新闻草稿
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub title: Title,
    pub slug: Slug,
    pub summary: String,
    pub body_html: String,
    pub cover_image: Option<String>,
    pub gallery: Vec<String>,
    pub published_on: NaiveDate,
    pub published: bool,
}

impl NewsDraft {
    /// 校验原始输入并构造草稿
    ///
    /// slug 缺省时由标题生成
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        slug: Option<&str>,
        summary: &str,
        body_html: String,
        cover_image: Option<String>,
        gallery: Vec<String>,
        published_on: NaiveDate,
        published: bool,
    ) -> Result<Self, ContentError> {
        let title = Title::new(title)?;
        let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Slug::parse(s)?,
            None => Slug::from_title(title.as_str())?,
        };

        let summary = if summary.trim().is_empty() {
            String::new()
        } else {
            bounded_text(summary, MAX_SUMMARY_CHARS)
                .map_err(|rule| ContentError::InvalidSummary(format!("摘要{}", rule)))?
        };

        if gallery.len() > MAX_GALLERY_IMAGES {
            return Err(ContentError::TooManyImages(gallery.len()));
        }

        let cover_image = cover_image.filter(|c| !c.trim().is_empty());
        for image in cover_image.iter().chain(gallery.iter()) {
            if !is_image_reference(image) {
                return Err(ContentError::InvalidImage(image.clone()));
            }
        }

        Ok(Self {
            title,
            slug,
            summary,
            body_html,
            cover_image,
            gallery,
            published_on,
            published,
        })
    }
}

/// 图片引用必须是站内上传路径或 http(s) 地址
fn is_image_reference(value: &str) -> bool {
    value.starts_with('/') || value.starts_with("http://") || value.starts_with("https://")
}

/// 新闻条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: Title,
    pub slug: Slug,
    pub summary: String,
    pub body_html: String,
    pub cover_image: Option<String>,
    pub gallery: Vec<String>,
    pub published_on: NaiveDate,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsItem {
    pub fn new(draft: NewsDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            slug: draft.slug,
            summary: draft.summary,
            body_html: draft.body_html,
            cover_image: draft.cover_image,
            gallery: draft.gallery,
            published_on: draft.published_on,
            published: draft.published,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: NewsDraft) {
        self.title = draft.title;
        self.slug = draft.slug;
        self.summary = draft.summary;
        self.body_html = draft.body_html;
        self.cover_image = draft.cover_image;
        self.gallery = draft.gallery;
        self.published_on = draft.published_on;
        self.published = draft.published;
        self.updated_at = Utc::now();
    }

    /// 该条新闻引用的全部图片
    pub fn images(&self) -> impl Iterator<Item = &String> {
        self.cover_image.iter().chain(self.gallery.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_slug_defaults_to_title() {
        let draft = NewsDraft::new(
            "Vaccination Drive Launched",
            None,
            "",
            String::new(),
            None,
            Vec::new(),
            date(),
            true,
        )
        .unwrap();
        assert_eq!(draft.slug.as_str(), "vaccination-drive-launched");
    }

    #[test]
    fn test_rejects_relative_image_paths() {
        let result = NewsDraft::new(
            "Gallery",
            Some("gallery"),
            "",
            String::new(),
            None,
            vec!["images/a.png".to_string()],
            date(),
            true,
        );
        assert_eq!(
            result.unwrap_err(),
            ContentError::InvalidImage("images/a.png".to_string())
        );
    }

    #[test]
    fn test_rejects_oversized_gallery() {
        let gallery = vec!["/uploads/images/a.png".to_string(); MAX_GALLERY_IMAGES + 1];
        let result = NewsDraft::new(
            "Gallery",
            Some("gallery"),
            "",
            String::new(),
            None,
            gallery,
            date(),
            true,
        );
        assert!(matches!(result, Err(ContentError::TooManyImages(_))));
    }

    #[test]
    fn test_images_includes_cover_first() {
        let draft = NewsDraft::new(
            "Gallery",
            Some("gallery"),
            "short",
            String::new(),
            Some("/uploads/images/cover.png".to_string()),
            vec!["/uploads/images/a.png".to_string()],
            date(),
            true,
        )
        .unwrap();
        let item = NewsItem::new(draft);
        let images: Vec<&String> = item.images().collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0], "/uploads/images/cover.png");
    }
}
