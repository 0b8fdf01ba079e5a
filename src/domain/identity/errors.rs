//! Identity Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("无效的用户名: {0}")]
    InvalidUsername(String),

    #[error("密码长度必须在 {min} 到 {max} 个字符之间")]
    InvalidPassword { min: usize, max: usize },

    #[error("无法解析密码哈希")]
    MalformedHash,
}
