// ==========================================
// 作業日報システム - 登录认证
// ==========================================
// 作业者: 工厂 + 该工厂口令 → role=user
// 管理员: 共用口令 → role=admin
// 无锁定、无限流
// ==========================================

use chrono::Local;
use uuid::Uuid;

use crate::auth::credential::HashedSecret;
use crate::auth::error::{AuthError, AuthResult};
use crate::config::AppConfig;
use crate::domain::session::SessionContext;

struct FactorySecret {
    factory: String,
    secret: Option<HashedSecret>,
}

// ==========================================
// Authenticator
// ==========================================
pub struct Authenticator {
    factories: Vec<FactorySecret>,
    admin_secret: Option<HashedSecret>,
}

impl Authenticator {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            factories: config
                .factories
                .iter()
                .map(|f| FactorySecret {
                    factory: f.name.clone(),
                    secret: f.password_hash.as_deref().map(HashedSecret::from_hash),
                })
                .collect(),
            admin_secret: config.admin_password_hash.as_deref().map(HashedSecret::from_hash),
        }
    }

    /// 作业者登录
    pub fn login_worker(&self, factory: &str, password: &str) -> AuthResult<SessionContext> {
        let entry = self
            .factories
            .iter()
            .find(|f| f.factory == factory)
            .ok_or_else(|| AuthError::UnknownFactory(factory.to_string()))?;

        let secret = entry
            .secret
            .as_ref()
            .ok_or_else(|| AuthError::SecretNotConfigured(factory.to_string()))?;

        if !secret.verify(password)? {
            tracing::info!(factory, "作业者登录失败");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(factory, "作业者登录成功");
        Ok(SessionContext::worker(
            new_session_id(),
            factory,
            Local::now().naive_local(),
        ))
    }

    /// 管理员登录
    pub fn login_admin(&self, password: &str) -> AuthResult<SessionContext> {
        let secret = self
            .admin_secret
            .as_ref()
            .ok_or_else(|| AuthError::SecretNotConfigured("admin".to_string()))?;

        if !secret.verify(password)? {
            tracing::info!("管理员登录失败");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("管理员登录成功");
        Ok(SessionContext::admin(new_session_id(), Local::now().naive_local()))
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FactoryConfig;
    use crate::domain::types::Role;

    fn config() -> AppConfig {
        AppConfig {
            factories: vec![
                FactoryConfig {
                    name: "本社工場".to_string(),
                    password_hash: Some(HashedSecret::from_plain("honsha").unwrap().as_str().to_string()),
                },
                FactoryConfig::new("八尾工場"),
            ],
            admin_password_hash: Some(HashedSecret::from_plain("admin").unwrap().as_str().to_string()),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_worker_login() {
        let auth = Authenticator::from_config(&config());
        let ctx = auth.login_worker("本社工場", "honsha").unwrap();
        assert_eq!(ctx.role, Role::User);
        assert_eq!(ctx.factory.as_deref(), Some("本社工場"));
    }

    #[test]
    fn test_worker_login_failures() {
        let auth = Authenticator::from_config(&config());
        assert_eq!(
            auth.login_worker("本社工場", "yao").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(matches!(
            auth.login_worker("八尾工場", "yao").unwrap_err(),
            AuthError::SecretNotConfigured(_)
        ));
        assert!(matches!(
            auth.login_worker("京都工場", "honsha").unwrap_err(),
            AuthError::UnknownFactory(_)
        ));
    }

    #[test]
    fn test_admin_login() {
        let auth = Authenticator::from_config(&config());
        let ctx = auth.login_admin("admin").unwrap();
        assert!(ctx.is_admin());
        assert!(ctx.factory.is_none());
        assert_eq!(auth.login_admin("honsha").unwrap_err(), AuthError::InvalidCredentials);
    }
}
