// ==========================================
// ReportApi 集成测试
// ==========================================
// 测试范围:
// 1. 提交: 工厂取自会话、必填项、计数
// 2. 查询: 作业者仅本工厂,管理员全部/按工厂
// 3. 合计与作业终了提交
// ==========================================

mod helpers;

use chrono::NaiveDate;
use helpers::api_test_helper::*;
use helpers::test_data_builder::ReportBuilder;
use shopfloor_report::api::ApiError;
use shopfloor_report::domain::types::{SetupKind, WorkStatus};
use shopfloor_report::engine::WorkSession;
use test_helpers::{HONSHA, YAO};

#[test]
fn test_submit_report_工厂取自会话() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let worker = env.worker(YAO);

    let report = env
        .state
        .report_api
        .submit_report(&worker, ReportBuilder::new(HONSHA).worker("  青井 ").ground(12, 1).draft())
        .unwrap();
    assert_eq!(report.factory, YAO);
    assert_eq!(report.worker, "青井");

    let listed = env.state.report_api.list_reports(&env.admin(), None);
    assert_eq!(listed, vec![report]);
}

#[test]
fn test_list_reports_按工厂过滤() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.report_api;
    let honsha = env.worker(HONSHA);
    let yao = env.worker(YAO);

    api.submit_report(&honsha, ReportBuilder::new(HONSHA).ground(1, 0).draft()).unwrap();
    api.submit_report(&yao, ReportBuilder::new(YAO).ground(2, 0).draft()).unwrap();
    api.submit_report(&honsha, ReportBuilder::new(HONSHA).ground(3, 0).draft()).unwrap();

    // 作业者忽略过滤参数
    let own = api.list_reports(&honsha, Some(YAO));
    assert_eq!(own.len(), 2);
    assert!(own.iter().all(|r| r.factory == HONSHA));
    let counts: Vec<i64> = own.iter().map(|r| r.ground_ok).collect();
    assert_eq!(counts, vec![1, 3]);

    let admin = env.admin();
    assert_eq!(api.list_reports(&admin, None).len(), 3);
    let filtered = api.list_reports(&admin, Some(YAO));
    assert_eq!(filtered.len(), 1);
    assert!(filtered.iter().all(|r| r.factory == YAO));
}

#[test]
fn test_submit_report_校验() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.report_api;
    let worker = env.worker(HONSHA);

    let blank_line = ReportBuilder::new(HONSHA).line(" ").draft();
    assert!(matches!(
        api.submit_report(&worker, blank_line),
        Err(ApiError::ValidationFailure(_))
    ));

    let negative = ReportBuilder::new(HONSHA).ground(-1, 0).draft();
    assert!(matches!(
        api.submit_report(&worker, negative),
        Err(ApiError::ValidationFailure(_))
    ));

    // 未选择工厂的管理员不能提交
    let admin = env.admin();
    assert!(api
        .submit_report(&admin, ReportBuilder::new(HONSHA).draft())
        .is_err());

    assert!(api.list_reports(&env.admin(), None).is_empty());
}

#[test]
fn test_submit_report_管理员选择工厂后提交() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let mut admin = env.admin();
    assert!(admin.select_factory(HONSHA));

    let report = env
        .state
        .report_api
        .submit_report(&admin, ReportBuilder::new(YAO).draft())
        .unwrap();
    assert_eq!(report.factory, HONSHA);
}

#[test]
fn test_production_totals_合计() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let api = &env.state.report_api;
    let worker = env.worker(HONSHA);

    api.submit_report(&worker, ReportBuilder::new(HONSHA).ground(100, 3).rubber(40, 1).draft())
        .unwrap();
    api.submit_report(&worker, ReportBuilder::new(HONSHA).ground(50, 0).rubber(10, 2).draft())
        .unwrap();
    api.submit_report(&env.worker(YAO), ReportBuilder::new(YAO).ground(999, 9).draft())
        .unwrap();

    let totals = api.production_totals(&worker, None);
    assert_eq!(totals.report_count, 2);
    assert_eq!(totals.ground_ok, 150);
    assert_eq!(totals.ground_ng, 3);
    assert_eq!(totals.rubber_ok, 50);
    assert_eq!(totals.rubber_ng, 3);
}

#[test]
fn test_finish_and_submit_作业终了提交() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let worker = env.worker(HONSHA);
    let t = |h: u32| NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(h, 0, 0).unwrap();

    let mut work = WorkSession::new();
    work.begin_setup(SetupKind::Minor, t(8)).unwrap();
    work.start(t(9)).unwrap();
    work.interrupt("清掃", t(10)).unwrap();
    work.resume(t(11)).unwrap();

    let (summary, report) = env
        .state
        .report_api
        .finish_and_submit(&worker, &mut work, ReportBuilder::new(HONSHA).ground(80, 2).draft())
        .unwrap();

    assert_eq!(work.status(), WorkStatus::Finished);
    assert_eq!(summary.setup_count, 1);
    assert_eq!(summary.interruption_count, 1);
    assert_eq!(summary.interrupted_minutes, 60);
    assert_eq!(report.ground_ok, 80);
    assert_eq!(env.state.report_api.list_reports(&worker, None).len(), 1);
}

#[test]
fn test_finish_and_submit_输入错误时不终了() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let worker = env.worker(HONSHA);

    let mut work = WorkSession::new();
    work.start(now()).unwrap();

    let result = env.state.report_api.finish_and_submit(
        &worker,
        &mut work,
        ReportBuilder::new(HONSHA).machine("").draft(),
    );
    assert!(matches!(result, Err(ApiError::ValidationFailure(_))));
    assert_eq!(work.status(), WorkStatus::Working);

    // 未开始的作业不能终了
    let mut idle = WorkSession::new();
    let result = env
        .state
        .report_api
        .finish_and_submit(&worker, &mut idle, ReportBuilder::new(HONSHA).draft());
    assert!(matches!(result, Err(ApiError::InvalidStateTransition { .. })));
    assert!(env.state.report_api.list_reports(&worker, None).is_empty());
}
