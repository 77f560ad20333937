// ==========================================
// 作業日報システム - 进度一览 (命令行)
// ==========================================
// 用法: shopfloor-report [YYYY-MM-DD]
// 日期省略时以今天为基准判定排程延迟
// ==========================================

use chrono::{Local, NaiveDate};
use std::process::ExitCode;

use shopfloor_report::app::AppState;
use shopfloor_report::config::ConfigManager;
use shopfloor_report::i18n::{self, t};
use shopfloor_report::{logging, APP_NAME, VERSION};

fn main() -> ExitCode {
    logging::init();

    let today = match std::env::args().nth(1) {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                eprintln!("日付の形式が不正です ({}): {}", raw, e);
                return ExitCode::from(2);
            }
        },
        None => Local::now().date_naive(),
    };

    let config = match ConfigManager::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("設定を読み込めません: {}", e);
            return ExitCode::FAILURE;
        }
    };
    i18n::set_locale(&config.locale);

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} v{} ({})", APP_NAME, VERSION, state.store_location);
    println!();

    let plans = state.dashboard_api.list_plan_progress();
    if plans.is_empty() {
        println!("計画: なし");
    }
    for p in &plans {
        println!(
            "[{}] {} 目標 {} / 実績 {} / 残 {} ({:.1}%) {} 納期 {}",
            p.plan.plan_id,
            p.plan.name,
            p.plan.target_qty,
            p.total,
            p.remaining,
            p.progress_ratio * 100.0,
            t(p.status.message_key()),
            p.plan.due_date,
        );
        for c in &p.contributions {
            println!(
                "    {} {} 件 → {}",
                c.mapping.count_column.label(),
                c.matched_reports,
                c.subtotal
            );
        }
    }

    let schedule = state.dashboard_api.list_schedule_progress(today);
    if !schedule.is_empty() {
        println!();
        for s in &schedule {
            println!(
                "{} {} {} 目標 {} / 実績 {} {} 予定日 {}",
                s.schedule.factory,
                s.schedule.line,
                s.schedule.model,
                s.schedule.target_qty,
                s.total,
                t(s.status.message_key()),
                s.schedule.scheduled_date,
            );
        }
    }

    ExitCode::SUCCESS
}
