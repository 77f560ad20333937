// ==========================================
// 作業日報システム - 规则型排程进度引擎
// ==========================================
// 早期变体: 每个 (factory, line, model) 一条计数规则
// 规则指定目标机械与计数列; 与 PlanMapping 不组合
// 状态: 完成 / 进行中 / 延迟 (排程日已过且未达成)
// ==========================================

use chrono::NaiveDate;

use crate::domain::plan::{CountingRule, ScheduleEntry, ScheduleProgress};
use crate::domain::report::Report;
use crate::domain::types::ProgressStatus;
use crate::engine::progress::evaluate_against_target;

pub struct RuleProgressEngine {}

impl Default for RuleProgressEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleProgressEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算单个排程的进度
    ///
    /// # 参数
    /// - `entry`: 排程
    /// - `rules`: 全部计数规则 (取第一条适用规则)
    /// - `reports`: 全部日报快照
    /// - `today`: 判定延迟的基准日
    pub fn calculate(
        &self,
        entry: &ScheduleEntry,
        rules: &[CountingRule],
        reports: &[Report],
        today: NaiveDate,
    ) -> ScheduleProgress {
        let rule = rules.iter().find(|r| r.applies_to(entry)).cloned();

        let total = match &rule {
            Some(rule) => reports
                .iter()
                .filter(|r| {
                    r.factory == entry.factory
                        && r.line == entry.line
                        && r.model == entry.model
                        && r.machine == rule.target_machine
                })
                .fold(0i64, |acc, r| acc.saturating_add(r.count_of(rule.target_column))),
            None => {
                tracing::debug!(
                    schedule_id = %entry.schedule_id,
                    factory = %entry.factory,
                    line = %entry.line,
                    model = %entry.model,
                    "未找到计数规则,实绩按 0 计"
                );
                0
            }
        };

        let (remaining, progress_ratio, mut status) =
            evaluate_against_target(entry.target_qty, total);
        if status != ProgressStatus::Complete && today > entry.scheduled_date {
            status = ProgressStatus::Delayed;
        }

        ScheduleProgress {
            schedule: entry.clone(),
            rule,
            total,
            remaining,
            progress_ratio,
            status,
        }
    }

    /// 批量计算 (排程顺序不变)
    pub fn calculate_all(
        &self,
        entries: &[ScheduleEntry],
        rules: &[CountingRule],
        reports: &[Report],
        today: NaiveDate,
    ) -> Vec<ScheduleProgress> {
        entries
            .iter()
            .map(|e| self.calculate(e, rules, reports, today))
            .collect()
    }
}
