//! Notice Context - Value Objects

use serde::{Deserialize, Serialize};
use url::Url;

use super::{NoticeError, SubNotice};

/// 公告类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Document,
    Url,
    SubNotices,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Document => "document",
            NoticeKind::Url => "url",
            NoticeKind::SubNotices => "subNotices",
        }
    }

    pub fn parse(s: &str) -> Result<Self, NoticeError> {
        match s {
            "document" => Ok(NoticeKind::Document),
            "url" => Ok(NoticeKind::Url),
            "subNotices" => Ok(NoticeKind::SubNotices),
            other => Err(NoticeError::UnknownKind(other.to_string())),
        }
    }
}

/// 单个文档或链接（子公告使用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoticeLink {
    Document { file: String },
    Url { url: String },
}

impl NoticeLink {
    /// 由可选的文件与链接构造，二者必须恰好提供一个
    pub fn from_parts(file: Option<String>, url: Option<String>) -> Result<Self, NoticeError> {
        match (non_blank(file), non_blank(url)) {
            (Some(file), None) => Ok(NoticeLink::Document {
                file: validate_document(file)?,
            }),
            (None, Some(url)) => Ok(NoticeLink::Url {
                url: validate_url(url)?,
            }),
            (None, None) => Err(NoticeError::MissingField {
                kind: "subNotice",
                field: "file|url",
            }),
            (Some(_), Some(_)) => Err(NoticeError::UnexpectedField {
                kind: "subNotice",
                field: "url",
            }),
        }
    }

    pub fn document(&self) -> Option<&str> {
        match self {
            NoticeLink::Document { file } => Some(file),
            NoticeLink::Url { .. } => None,
        }
    }
}

/// 公告正文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoticeBody {
    Document { file: String },
    Url { url: String },
    SubNotices { items: Vec<SubNotice> },
}

impl NoticeBody {
    pub fn kind(&self) -> NoticeKind {
        match self {
            NoticeBody::Document { .. } => NoticeKind::Document,
            NoticeBody::Url { .. } => NoticeKind::Url,
            NoticeBody::SubNotices { .. } => NoticeKind::SubNotices,
        }
    }

    /// 按类型做条件必填校验
    ///
    /// - document: 必须有 file，不得有 url
    /// - url: 必须有 url，不得有 file
    /// - subNotices: file 与 url 都不得提供，子公告另行添加
    pub fn from_parts(
        kind: NoticeKind,
        file: Option<String>,
        url: Option<String>,
    ) -> Result<Self, NoticeError> {
        let file = non_blank(file);
        let url = non_blank(url);
        let tag = kind.as_str();

        match kind {
            NoticeKind::Document => {
                if url.is_some() {
                    return Err(NoticeError::UnexpectedField { kind: tag, field: "url" });
                }
                let file = file.ok_or(NoticeError::MissingField { kind: tag, field: "file" })?;
                Ok(NoticeBody::Document {
                    file: validate_document(file)?,
                })
            }
            NoticeKind::Url => {
                if file.is_some() {
                    return Err(NoticeError::UnexpectedField { kind: tag, field: "file" });
                }
                let url = url.ok_or(NoticeError::MissingField { kind: tag, field: "url" })?;
                Ok(NoticeBody::Url {
                    url: validate_url(url)?,
                })
            }
            NoticeKind::SubNotices => {
                if file.is_some() {
                    return Err(NoticeError::UnexpectedField { kind: tag, field: "file" });
                }
                if url.is_some() {
                    return Err(NoticeError::UnexpectedField { kind: tag, field: "url" });
                }
                Ok(NoticeBody::SubNotices { items: Vec::new() })
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 外部链接必须是带主机名的绝对 http(s) 地址
pub(crate) fn validate_url(url: String) -> Result<String, NoticeError> {
    // 解析器会裁掉首尾空白，原串中的空白另行拒绝
    let valid = !url.chars().any(char::is_whitespace)
        && Url::parse(&url).is_ok_and(|parsed| {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        });
    if valid {
        Ok(url)
    } else {
        Err(NoticeError::InvalidUrl(url))
    }
}

/// 文档必须是站内上传的 PDF
pub(crate) fn validate_document(file: String) -> Result<String, NoticeError> {
    if file.starts_with('/') && !file.contains("..") && file.to_lowercase().ends_with(".pdf") {
        Ok(file)
    } else {
        Err(NoticeError::InvalidDocument(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_requires_file() {
        let err = NoticeBody::from_parts(NoticeKind::Document, None, None).unwrap_err();
        assert_eq!(
            err,
            NoticeError::MissingField {
                kind: "document",
                field: "file"
            }
        );
    }

    #[test]
    fn test_url_rejects_file() {
        let err = NoticeBody::from_parts(
            NoticeKind::Url,
            Some("/uploads/documents/a.pdf".to_string()),
            Some("https://example.org".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, NoticeError::UnexpectedField { field: "file", .. }));
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let body = NoticeBody::from_parts(
            NoticeKind::Url,
            Some("   ".to_string()),
            Some("https://dghs.gov.bd/notice".to_string()),
        )
        .unwrap();
        assert_eq!(body.kind(), NoticeKind::Url);
    }

    #[test]
    fn test_sub_notices_start_empty() {
        let body = NoticeBody::from_parts(NoticeKind::SubNotices, None, None).unwrap();
        assert_eq!(body, NoticeBody::SubNotices { items: Vec::new() });
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_url("https://example.org/a?b=c".to_string()).is_ok());
        assert!(validate_url("ftp://example.org".to_string()).is_err());
        assert!(validate_url("https://".to_string()).is_err());
        assert!(validate_url("https://exa mple.org".to_string()).is_err());
        assert!(validate_url("https://@/".to_string()).is_err());
        assert!(validate_url(" https://example.org".to_string()).is_err());
        assert!(validate_url("mailto:office@example.org".to_string()).is_err());
        assert!(validate_url("HTTP://Example.org:8080/path".to_string()).is_ok());
    }

    #[test]
    fn test_document_must_be_local_pdf() {
        assert!(validate_document("/uploads/documents/a.PDF".to_string()).is_ok());
        assert!(validate_document("/uploads/images/a.png".to_string()).is_err());
        assert!(validate_document("/uploads/../etc/a.pdf".to_string()).is_err());
        assert!(validate_document("a.pdf".to_string()).is_err());
    }

    #[test]
    fn test_body_serializes_with_type_tag() {
        let body = NoticeBody::SubNotices { items: Vec::new() };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "subNotices");

        let body = NoticeBody::Document {
            file: "/uploads/documents/a.pdf".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["file"], "/uploads/documents/a.pdf");
    }

    #[test]
    fn test_link_requires_exactly_one() {
        assert!(NoticeLink::from_parts(None, None).is_err());
        assert!(NoticeLink::from_parts(
            Some("/uploads/documents/a.pdf".to_string()),
            Some("https://example.org".to_string())
        )
        .is_err());
        let link = NoticeLink::from_parts(Some("/uploads/documents/a.pdf".to_string()), None).unwrap();
        assert_eq!(link.document(), Some("/uploads/documents/a.pdf"));
    }
}
