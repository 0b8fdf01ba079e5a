//! Identity Context - 管理员身份限界上下文

mod admin;
mod errors;
mod password;

pub use admin::{AdminUser, Username};
pub use errors::IdentityError;
pub use password::{Password, PasswordHash, DEFAULT_ITERATIONS};
