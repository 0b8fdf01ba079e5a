//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, StorageError};
use crate::domain::content::ContentError;
use crate::domain::identity::IdentityError;
use crate::domain::notice::NoticeError;
use crate::domain::procurement::ProcurementError;
use crate::domain::results::ResultsError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 唯一性或引用冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 认证失败
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 业务规则违反
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建 NotFound 错误（使用字符串 ID）
    pub fn not_found_str(resource_type: &'static str, id: &str) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建冲突错误
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// 创建认证失败错误
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// 创建业务规则违反错误
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::IoError(msg) => Self::StorageError(msg),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

macro_rules! validation_from {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for ApplicationError {
                fn from(err: $err) -> Self {
                    Self::ValidationError(err.to_string())
                }
            }
        )*
    };
}

validation_from!(ContentError, ProcurementError, ResultsError);

impl From<NoticeError> for ApplicationError {
    fn from(err: NoticeError) -> Self {
        match err {
            NoticeError::SubNoticeNotFound(id) => Self::not_found("SubNotice", id),
            NoticeError::NotASubNoticeContainer(_) => Self::BusinessRuleViolation(err.to_string()),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

impl From<IdentityError> for ApplicationError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MalformedHash => Self::InternalError(err.to_string()),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: ApplicationError = RepositoryError::Duplicate("slug about".to_string()).into();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[test]
    fn test_storage_io_is_not_a_client_error() {
        let err: ApplicationError = StorageError::IoError("disk full".to_string()).into();
        assert!(matches!(err, ApplicationError::StorageError(_)));

        let err: ApplicationError = StorageError::UnsupportedType("exe".to_string()).into();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[test]
    fn test_sub_notice_not_found_maps_to_not_found() {
        let id = Uuid::new_v4();
        let err: ApplicationError = NoticeError::SubNoticeNotFound(id).into();
        match err {
            ApplicationError::NotFound { resource_type, id: got } => {
                assert_eq!(resource_type, "SubNotice");
                assert_eq!(got, id.to_string());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
