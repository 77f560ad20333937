// ==========================================
// 作業日報システム - 认证层
// ==========================================
// 职责: 口令哈希校验、登录后生成会话上下文
// ==========================================

pub mod authenticator;
pub mod credential;
pub mod error;

pub use authenticator::Authenticator;
pub use credential::HashedSecret;
pub use error::{AuthError, AuthResult};
