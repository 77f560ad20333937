// ==========================================
// 作業日報システム - 登录 API
// ==========================================
// 成功: 建立会话; 失败: 当前会话保持不变
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::auth::Authenticator;
use crate::domain::session::{SessionContext, SessionState};

pub struct AuthApi {
    authenticator: Arc<Authenticator>,
}

impl AuthApi {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// 作业者登录
    pub fn login_worker<'s>(
        &self,
        state: &'s mut SessionState,
        factory: &str,
        password: &str,
    ) -> ApiResult<&'s SessionContext> {
        let ctx = self.authenticator.login_worker(factory, password)?;
        Ok(state.establish(ctx))
    }

    /// 管理员登录
    pub fn login_admin<'s>(&self, state: &'s mut SessionState, password: &str) -> ApiResult<&'s SessionContext> {
        let ctx = self.authenticator.login_admin(password)?;
        Ok(state.establish(ctx))
    }

    /// 登出
    pub fn logout(&self, state: &mut SessionState) {
        if let Some(ctx) = state.logout() {
            tracing::info!(session_id = %ctx.session_id, role = %ctx.role, "已登出");
        }
    }
}
