// ==========================================
// 作業日報システム - 演示数据生成
// ==========================================
// 用法: seed_demo_db [db_path] [admin_password]
// 既有数据库先备份再重建; 配置文件写在数据库同目录
// ==========================================

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use shopfloor_report::app::{get_default_db_path, AppState};
use shopfloor_report::auth::HashedSecret;
use shopfloor_report::config::{env_keys, AppConfig, ConfigManager, FactoryConfig, StoreBackend};
use shopfloor_report::domain::plan::{CountingRule, MappingFilters};
use shopfloor_report::domain::report::ReportDraft;
use shopfloor_report::domain::session::SessionContext;
use shopfloor_report::domain::types::{CountColumn, FieldFilter, MasterCategory};
use shopfloor_report::logging;

const DEFAULT_ADMIN_PASSWORD: &str = "admin";
const CONFIG_FILE_NAME: &str = "shopfloor_config.json";

/// 工厂与作业者口令
const FACTORY_SECRETS: [(&str, &str); 2] = [("本社工場", "honsha"), ("八尾工場", "yao")];

const LINES: [&str; 3] = ["外径ライン", "組み立てライン", "3号ライン"];
const WORKERS: [&str; 4] = ["廣瀬", "青井", "門", "坂本"];
const MODELS: [&str; 3] = ["UA25", "SN6311T071", "RNU205ETW2"];
const PRODUCTS: [&str; 3] = ["SHI", "韓国", "シリンドリカル"];
const MACHINES: [&str; 3] = ["センターレス1号機", "T11J", "韓国製品組立機 1号機"];

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let admin_password = std::env::args()
        .nth(2)
        .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

    backup_and_reset_db(&db_path)?;

    let config = build_config(&db_path, &admin_password)?;
    let config_path = config_path_for(&db_path);
    ConfigManager::save_to_path(&config, &config_path)?;

    let state = AppState::new(config)?;
    let now = Local::now().naive_local();
    let admin = SessionContext::admin("seed".to_string(), now);

    seed_master_data(&state, &admin)?;
    seed_plans(&state, &admin, now.date())?;
    seed_reports(&state, now)?;

    print_quick_counts(&state, &admin);
    eprintln!(
        "Config written to {} (set {}={})",
        config_path.display(),
        env_keys::CONFIG_PATH,
        config_path.display()
    );
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn config_path_for(db_path: &str) -> PathBuf {
    Path::new(db_path)
        .parent()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

fn build_config(db_path: &str, admin_password: &str) -> Result<AppConfig, Box<dyn Error>> {
    let mut factories = Vec::new();
    for (name, secret) in FACTORY_SECRETS {
        factories.push(FactoryConfig {
            name: name.to_string(),
            password_hash: Some(HashedSecret::from_plain(secret)?.as_str().to_string()),
        });
    }

    let mut config = AppConfig {
        factories,
        admin_password_hash: Some(HashedSecret::from_plain(admin_password)?.as_str().to_string()),
        ..AppConfig::default()
    };
    config.store.backend = StoreBackend::Sqlite;
    config.store.location = db_path.to_string();
    Ok(config)
}

fn seed_master_data(state: &AppState, admin: &SessionContext) -> Result<(), Box<dyn Error>> {
    let groups: [(MasterCategory, &[&str]); 5] = [
        (MasterCategory::Line, &LINES),
        (MasterCategory::Worker, &WORKERS),
        (MasterCategory::Model, &MODELS),
        (MasterCategory::Product, &PRODUCTS),
        (MasterCategory::Machine, &MACHINES),
    ];

    for (factory, _) in FACTORY_SECRETS {
        for (category, values) in &groups {
            for value in values.iter() {
                state.master_api.add_option(admin, factory, *category, value)?;
            }
        }
    }
    Ok(())
}

fn seed_plans(state: &AppState, admin: &SessionContext, today: NaiveDate) -> Result<(), Box<dyn Error>> {
    let due = today + Duration::days(14);

    // 研削: 本社工場 外径ライン UA25
    let ground_plan = state.plan_api.create_plan(admin, "UA25 研削 月次", 1000, due)?;
    state.plan_api.add_mapping(
        admin,
        &ground_plan,
        MappingFilters {
            factory: FieldFilter::value("本社工場"),
            line: FieldFilter::value("外径ライン"),
            model: FieldFilter::value("UA25"),
            ..MappingFilters::default()
        },
        CountColumn::GroundOk,
    )?;

    // ラバ研: 两个机械分别映射后合计
    let rubber_plan = state.plan_api.create_plan(admin, "RNU205ETW2 ラバ研", 600, due)?;
    for machine in ["T11J", "韓国製品組立機 1号機"] {
        state.plan_api.add_mapping(
            admin,
            &rubber_plan,
            MappingFilters {
                model: FieldFilter::value("RNU205ETW2"),
                machine: FieldFilter::value(machine),
                ..MappingFilters::default()
            },
            CountColumn::RubberOk,
        )?;
    }

    // 规则型排程
    state.plan_api.add_schedule_entry(admin, "八尾工場", "組み立てライン", "RNU205ETW2", 300, today - Duration::days(1))?;
    state.plan_api.add_counting_rule(
        admin,
        CountingRule {
            factory: "八尾工場".to_string(),
            line: "組み立てライン".to_string(),
            model: "RNU205ETW2".to_string(),
            target_machine: "韓国製品組立機 1号機".to_string(),
            target_column: CountColumn::RubberOk,
        },
    )?;
    Ok(())
}

fn seed_reports(state: &AppState, now: NaiveDateTime) -> Result<(), Box<dyn Error>> {
    for day in 0..5i64 {
        let at = now - Duration::days(day);
        for (idx, (factory, _)) in FACTORY_SECRETS.iter().enumerate() {
            let session = SessionContext::worker(format!("seed-{}", idx), *factory, at);
            let i = (day as usize + idx) % 3;
            let draft = ReportDraft {
                worker: WORKERS[(day as usize + idx) % WORKERS.len()].to_string(),
                line: if idx == 0 { LINES[0] } else { LINES[1] }.to_string(),
                model: if idx == 0 { MODELS[0] } else { MODELS[2] }.to_string(),
                process_lot: format!("L{:02}", day + 1),
                product: PRODUCTS[i].to_string(),
                machine: MACHINES[(i + idx) % MACHINES.len()].to_string(),
                ground_ok: 120 + 10 * day,
                ground_ng: day % 3,
                rubber_ok: 60 + 5 * day,
                rubber_ng: (day + 1) % 2,
                note: String::new(),
            };
            state.report_api.submit_report_at(&session, draft, at)?;
        }
    }
    Ok(())
}

fn print_quick_counts(state: &AppState, admin: &SessionContext) {
    let totals = state.report_api.production_totals(admin, None);
    eprintln!("Seeded DB: {}", state.store_location);
    eprintln!("  reports:   {}", totals.report_count);
    eprintln!("  plans:     {}", state.plan_api.list_plans().len());
    eprintln!("  mappings:  {}", state.plan_api.list_mappings(None).len());
    eprintln!(
        "  options:   {}",
        state.master_api.list_all_options().len()
    );
}
