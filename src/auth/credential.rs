// ==========================================
// 作業日報システム - 口令哈希
// ==========================================
// 加盐 argon2; 判定结果与明文相等比较一致 (接受/拒绝不变)
// ==========================================

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::{AuthError, AuthResult};

/// 哈希后的口令 (PHC 字符串)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedSecret(String);

impl HashedSecret {
    /// 从明文生成哈希
    ///
    /// 工厂口令沿用现场既有口令,不做强度校验
    pub fn from_plain(secret: &str) -> AuthResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?;

        Ok(Self(hash.to_string()))
    }

    /// 从已有哈希创建 (配置文件读取)
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 校验口令
    ///
    /// # 返回
    /// - `Ok(true)`: 一致
    /// - `Ok(false)`: 不一致
    /// - `Err(HashError)`: 哈希字符串本身无效
    pub fn verify(&self, secret: &str) -> AuthResult<bool> {
        let parsed = PasswordHash::new(&self.0).map_err(|e| AuthError::HashError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = HashedSecret::from_plain("honsha").unwrap();
        assert!(hashed.as_str().starts_with("$argon2"));
        assert!(hashed.verify("honsha").unwrap());
        assert!(!hashed.verify("yao").unwrap());
        assert!(!hashed.verify("").unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let a = HashedSecret::from_plain("yao").unwrap();
        let b = HashedSecret::from_plain("yao").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_hash_string() {
        let broken = HashedSecret::from_hash("yao");
        assert!(matches!(broken.verify("yao"), Err(AuthError::HashError(_))));
    }
}
