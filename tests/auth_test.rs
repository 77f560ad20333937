// ==========================================
// 登录认证 集成测试
// ==========================================
// 测试范围:
// 1. 作业者/管理员登录后的会话内容
// 2. 失败时会话保持不变
// 3. 登出
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use shopfloor_report::api::ApiError;
use shopfloor_report::domain::session::SessionState;
use shopfloor_report::domain::types::Role;
use test_helpers::{ADMIN_PASSWORD, HONSHA, HONSHA_PASSWORD, YAO, YAO_PASSWORD};

#[test]
fn test_login_worker_正确口令() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let mut session = SessionState::new();

    let ctx = env
        .state
        .auth_api
        .login_worker(&mut session, YAO, YAO_PASSWORD)
        .unwrap();
    assert_eq!(ctx.role, Role::User);
    assert_eq!(ctx.factory.as_deref(), Some(YAO));
    assert!(session.is_logged_in());
}

#[test]
fn test_login_worker_口令与工厂不匹配() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let mut session = SessionState::new();

    // 八尾工場 的口令不能登录 本社工場
    let result = env.state.auth_api.login_worker(&mut session, HONSHA, YAO_PASSWORD);
    assert!(matches!(result, Err(ApiError::AuthenticationFailed(_))));
    assert!(!session.is_logged_in());
}

#[test]
fn test_login_失败不影响已有会话() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let auth = &env.state.auth_api;
    let mut session = SessionState::new();

    let original_id = auth
        .login_worker(&mut session, HONSHA, HONSHA_PASSWORD)
        .unwrap()
        .session_id
        .clone();

    assert!(auth.login_admin(&mut session, "wrong").is_err());
    assert!(auth.login_worker(&mut session, YAO, HONSHA_PASSWORD).is_err());

    let current = session.current().unwrap();
    assert_eq!(current.session_id, original_id);
    assert_eq!(current.factory.as_deref(), Some(HONSHA));
}

#[test]
fn test_login_admin_与登出() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let auth = &env.state.auth_api;
    let mut session = SessionState::new();

    let ctx = auth.login_admin(&mut session, ADMIN_PASSWORD).unwrap();
    assert!(ctx.is_admin());
    assert!(ctx.factory.is_none());

    let ctx = session.current_mut().unwrap();
    assert!(ctx.select_factory(YAO));

    auth.logout(&mut session);
    assert!(session.current().is_none());
}

#[test]
fn test_login_未登记工厂() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let mut session = SessionState::new();
    let result = env
        .state
        .auth_api
        .login_worker(&mut session, "京都工場", HONSHA_PASSWORD);
    assert!(matches!(result, Err(ApiError::AuthenticationFailed(_))));
}
