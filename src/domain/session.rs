// ==========================================
// 作業日報システム - 会话上下文
// ==========================================
// 登录时创建,登出时丢弃; 显式传入每个处理函数,不使用全局可变状态
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::Role;

// ==========================================
// SessionContext - 已登录会话
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub role: Role,
    /// 作业者: 登录工厂 (必填); 管理员: 当前选择的工厂 (可选)
    pub factory: Option<String>,
    pub logged_in_at: NaiveDateTime,
}

impl SessionContext {
    pub fn worker(session_id: String, factory: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            session_id,
            role: Role::User,
            factory: Some(factory.into()),
            logged_in_at: at,
        }
    }

    pub fn admin(session_id: String, at: NaiveDateTime) -> Self {
        Self {
            session_id,
            role: Role::Admin,
            factory: None,
            logged_in_at: at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 作业者只能看到本工厂; 管理员可看全部
    pub fn can_view_factory(&self, factory: &str) -> bool {
        self.is_admin() || self.factory.as_deref() == Some(factory)
    }

    /// 管理员切换当前工厂; 作业者不可切换
    pub fn select_factory(&mut self, factory: impl Into<String>) -> bool {
        if !self.is_admin() {
            return false;
        }
        self.factory = Some(factory.into());
        true
    }
}

// ==========================================
// SessionState - 会话槽
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Option<SessionContext>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SessionContext> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut SessionContext> {
        self.current.as_mut()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn establish(&mut self, ctx: SessionContext) -> &SessionContext {
        self.current.insert(ctx)
    }

    /// 登出: 丢弃会话,返回被丢弃的上下文
    pub fn logout(&mut self) -> Option<SessionContext> {
        self.current.take()
    }
}
