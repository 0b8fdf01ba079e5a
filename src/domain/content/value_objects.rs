//! Content Context - Value Objects

use serde::{Deserialize, Serialize};

use super::ContentError;
use crate::domain::bounded_text;

const MAX_SLUG_CHARS: usize = 120;
const MAX_TITLE_CHARS: usize = 250;

/// URL 友好标识
///
/// 不变量:
/// - 仅包含小写 ASCII 字母、数字和单个连字符
/// - 不以连字符开头或结尾
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn parse(value: impl Into<String>) -> Result<Self, ContentError> {
        let value = value.into();
        if value.is_empty() || value.len() > MAX_SLUG_CHARS {
            return Err(ContentError::InvalidSlug(value));
        }
        let valid_chars = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_chars
            || value.starts_with('-')
            || value.ends_with('-')
            || value.contains("--")
        {
            return Err(ContentError::InvalidSlug(value));
        }
        Ok(Self(value))
    }

    /// 从标题生成 slug（非 ASCII 字符被丢弃）
    pub fn from_title(title: &str) -> Result<Self, ContentError> {
        let mut slug = String::with_capacity(title.len());
        for ch in title.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let trimmed: String = slug
            .trim_end_matches('-')
            .chars()
            .take(MAX_SLUG_CHARS)
            .collect();
        Self::parse(trimmed.trim_end_matches('-').to_string())
            .map_err(|_| ContentError::InvalidSlug(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    pub fn new(title: impl AsRef<str>) -> Result<Self, ContentError> {
        bounded_text(title.as_ref(), MAX_TITLE_CHARS)
            .map(Self)
            .map_err(|rule| ContentError::InvalidTitle(format!("标题{}", rule)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
