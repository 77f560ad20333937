// ==========================================
// 作業日報システム - 认证错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("口令不正确")]
    InvalidCredentials,

    #[error("未配置的工厂: {0}")]
    UnknownFactory(String),

    #[error("未配置口令: {0}")]
    SecretNotConfigured(String),

    #[error("口令哈希处理失败: {0}")]
    HashError(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
