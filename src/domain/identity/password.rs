//! Identity Context - Password Hashing
//!
//! PBKDF2-HMAC-SHA256，存储格式:
//! `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::IdentityError;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const MIN_PASSWORD_CHARS: usize = 8;
const MAX_PASSWORD_CHARS: usize = 128;

/// 默认迭代次数
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// 明文密码（仅在内存中短暂存在）
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        let len = raw.chars().count();
        if !(MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&len) {
            return Err(IdentityError::InvalidPassword {
                min: MIN_PASSWORD_CHARS,
                max: MAX_PASSWORD_CHARS,
            });
        }
        Ok(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(***)")
    }
}

/// 已编码的密码哈希
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl PasswordHash {
    /// 使用随机盐计算哈希
    pub fn generate(password: &Password, iterations: u32) -> Self {
        let mut salt = vec![0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = derive(password.expose().as_bytes(), &salt, iterations);
        Self {
            iterations,
            salt,
            hash: hash.to_vec(),
        }
    }

    /// 不对应任何密码的哈希，用户不存在时用于校验以保持耗时一致
    pub fn placeholder(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
            salt: vec![0u8; SALT_LEN],
            hash: vec![0u8; HASH_LEN],
        }
    }

    /// 解析存储格式
    pub fn parse(encoded: &str) -> Result<Self, IdentityError> {
        let mut parts = encoded.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(IdentityError::MalformedHash);
        };
        if scheme != SCHEME {
            return Err(IdentityError::MalformedHash);
        }
        let iterations: u32 = iterations.parse().map_err(|_| IdentityError::MalformedHash)?;
        if iterations == 0 {
            return Err(IdentityError::MalformedHash);
        }
        let salt = hex::decode(salt).map_err(|_| IdentityError::MalformedHash)?;
        let hash = hex::decode(hash).map_err(|_| IdentityError::MalformedHash)?;
        if salt.is_empty() || hash.len() != HASH_LEN {
            return Err(IdentityError::MalformedHash);
        }
        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }

    /// 编码为存储格式
    pub fn encode(&self) -> String {
        format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            hex::encode(&self.salt),
            hex::encode(&self.hash)
        )
    }

    /// 常量时间比较
    pub fn verify(&self, candidate: &str) -> bool {
        let computed = derive(candidate.as_bytes(), &self.salt, self.iterations);
        computed.as_slice().ct_eq(self.hash.as_slice()).into()
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PasswordHash({}, iterations={})", SCHEME, self.iterations)
    }
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    let mut output = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pbkdf2_known_vectors() {
        let one = derive(b"password", b"salt", 1);
        assert_eq!(
            hex::encode(one),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        let two = derive(b"password", b"salt", 2);
        assert_eq!(
            hex::encode(two),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
    }

    #[test]
    fn test_generate_and_verify() {
        let password = Password::new("correct horse battery").unwrap();
        let hash = PasswordHash::generate(&password, 1_000);
        assert!(hash.verify("correct horse battery"));
        assert!(!hash.verify("correct horse battery!"));
    }

    #[test]
    fn test_encode_parse_preserves_verification() {
        let password = Password::new("s3cret-pass").unwrap();
        let hash = PasswordHash::generate(&password, 500);
        let encoded = hash.encode();
        assert!(encoded.starts_with("pbkdf2-sha256$500$"));

        let parsed = PasswordHash::parse(&encoded).unwrap();
        assert_eq!(parsed, hash);
        assert!(parsed.verify("s3cret-pass"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "bcrypt$10$aa$bb",
            "pbkdf2-sha256$x$aa$bb",
            "pbkdf2-sha256$0$aa$bb",
            "pbkdf2-sha256$10$zz$bb",
            "pbkdf2-sha256$10$aa$bb$cc",
        ] {
            assert_eq!(PasswordHash::parse(bad), Err(IdentityError::MalformedHash), "{bad}");
        }
    }

    #[test]
    fn test_salts_differ() {
        let password = Password::new("same-password").unwrap();
        let a = PasswordHash::generate(&password, 10);
        let b = PasswordHash::generate(&password, 10);
        assert_ne!(a.encode(), b.encode());
    }

    #[test]
    fn test_placeholder_never_verifies() {
        let placeholder = PasswordHash::placeholder(1_000);
        assert_eq!(placeholder.iterations(), 1_000);
        assert!(!placeholder.verify(""));
        assert!(!placeholder.verify("correct horse battery"));
        assert!(PasswordHash::parse(&placeholder.encode()).is_ok());
    }

    #[test]
    fn test_password_length_rules() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("x".repeat(129)).is_err());
        assert!(Password::new("long enough").is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let password = Password::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }
}
