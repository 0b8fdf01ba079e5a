//! Identity Context - Admin User

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{IdentityError, PasswordHash};

/// 管理员用户名（统一小写存储）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, IdentityError> {
        let value = raw.trim().to_lowercase();
        let valid = (3..=64).contains(&value.len())
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if !valid {
            return Err(IdentityError::InvalidUsername(raw.to_string()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 管理员账号
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl AdminUser {
    pub fn new(username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_lowercased() {
        assert_eq!(Username::new(" Admin.Ops ").unwrap().as_str(), "admin.ops");
    }

    #[test]
    fn test_username_rules() {
        assert!(Username::new("ab").is_err());
        assert!(Username::new("has space").is_err());
        assert!(Username::new("admin@x").is_err());
        assert!(Username::new("site_admin-2").is_ok());
    }
}
