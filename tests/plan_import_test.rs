// ==========================================
// 计划上传 集成测试
// ==========================================
// 测试范围:
// 1. 日语/英语表头、多种日期格式
// 2. 不合格行逐行拒绝,合格行照常创建
// 3. 文件级错误
// ==========================================

mod helpers;

use chrono::NaiveDate;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use helpers::api_test_helper::*;
use shopfloor_report::api::ApiError;
use test_helpers::HONSHA;

fn write_file(suffix: &str, lines: &[&str]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_import_plans_日语表头() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = write_file(
        ".csv",
        &[
            "計画名,目標数量,納期",
            "UA25 10月,\"1,000\",2026-10-31",
            "SHI 11月,500,2026/11/30",
            "RNU 12月,250,20261225",
            "シリアル,100,46326",
        ],
    );

    let result = env.state.plan_api.import_plans(&env.admin(), file.path()).unwrap();
    assert_eq!(result.imported.len(), 4);
    assert!(result.rejected.is_empty());

    let plans = env.state.plan_api.list_plans();
    let summary: Vec<(String, i64, NaiveDate)> = plans
        .iter()
        .map(|p| (p.name.clone(), p.target_qty, p.due_date))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("UA25 10月".to_string(), 1000, NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()),
            ("SHI 11月".to_string(), 500, NaiveDate::from_ymd_opt(2026, 11, 30).unwrap()),
            ("RNU 12月".to_string(), 250, NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()),
            ("シリアル".to_string(), 100, NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()),
        ]
    );

    let ids: Vec<&String> = plans.iter().map(|p| &p.plan_id).collect();
    assert_eq!(ids, result.imported.iter().collect::<Vec<_>>());
}

#[test]
fn test_import_plans_不合格行跳过() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = write_file(
        ".csv",
        &[
            "name,target_qty,due_date",
            "ok-1,10,2026-10-01",
            "zero,0,2026-10-01",
            ",10,2026-10-01",
            "bad-date,10,someday",
            "ok-2,20,2026-10-02",
        ],
    );

    let result = env.state.plan_api.import_plans(&env.admin(), file.path()).unwrap();
    assert_eq!(result.imported.len(), 2);
    let rejected_rows: Vec<usize> = result.rejected.iter().map(|r| r.row).collect();
    assert_eq!(rejected_rows, vec![3, 4, 5]);

    let names: Vec<String> = env.state.plan_api.list_plans().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["ok-1", "ok-2"]);
}

#[test]
fn test_import_plans_文件级错误() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let admin = env.admin();

    let missing_column = write_file(".csv", &["計画名,納期", "A,2026-10-01"]);
    assert!(matches!(
        env.state.plan_api.import_plans(&admin, missing_column.path()),
        Err(ApiError::ImportError(_))
    ));

    let wrong_ext = write_file(".txt", &["計画名,目標数量,納期"]);
    assert!(matches!(
        env.state.plan_api.import_plans(&admin, wrong_ext.path()),
        Err(ApiError::ImportError(_))
    ));

    assert!(env.state.plan_api.list_plans().is_empty());
}

#[test]
fn test_import_plans_作业者无权限() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let file = write_file(".csv", &["計画名,目標数量,納期", "A,1,2026-10-01"]);

    let result = env.state.plan_api.import_plans(&env.worker(HONSHA), file.path());
    assert!(matches!(result, Err(ApiError::PermissionDenied(_))));
}
