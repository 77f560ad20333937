// ==========================================
// 作業日報システム - 计划进度汇总引擎
// ==========================================
// 输入: 计划 + 该计划的映射 + 全部日报快照
// 输出: PlanProgress (实绩/剩余/进度率/状态)
// ==========================================
// 注意: 同一计划的多条映射各自独立求和后累加 (不取并集)
//       过滤条件重叠时同一日报会被重复计数,此行为保留
// ==========================================

use std::collections::HashMap;

use crate::domain::plan::{MappingContribution, Plan, PlanMapping, PlanProgress};
use crate::domain::report::Report;
use crate::domain::types::ProgressStatus;

// ==========================================
// ProgressAggregator - 进度汇总引擎
// ==========================================
pub struct ProgressAggregator {
    // 无状态引擎,数据读取由调用方处理
}

impl Default for ProgressAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAggregator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算单个计划的进度
    ///
    /// # 参数
    /// - `plan`: 目标计划
    /// - `mappings`: 属于该计划的映射 (其他计划的映射会被忽略)
    /// - `reports`: 全部日报快照
    pub fn calculate_progress(
        &self,
        plan: &Plan,
        mappings: &[PlanMapping],
        reports: &[Report],
    ) -> PlanProgress {
        // 1-3. 每条映射: 过滤 → 取计数列 → 求和
        let contributions: Vec<MappingContribution> = mappings
            .iter()
            .filter(|m| m.plan_id == plan.plan_id)
            .map(|m| self.sum_mapping(m, reports))
            .collect();

        // 4. 跨映射累加 (饱和加法)
        let total = contributions
            .iter()
            .fold(0i64, |acc, c| acc.saturating_add(c.subtotal));

        // 5. 与目标比较
        let (remaining, progress_ratio, status) = evaluate_against_target(plan.target_qty, total);

        tracing::debug!(
            plan_id = %plan.plan_id,
            mappings = contributions.len(),
            total,
            target = plan.target_qty,
            "计划进度汇总完成"
        );

        PlanProgress {
            plan: plan.clone(),
            total,
            remaining,
            progress_ratio,
            status,
            contributions,
        }
    }

    /// 批量计算全部计划的进度 (计划顺序不变)
    ///
    /// 引用不存在计划的映射被忽略
    pub fn calculate_all(
        &self,
        plans: &[Plan],
        mappings: &[PlanMapping],
        reports: &[Report],
    ) -> Vec<PlanProgress> {
        let mut by_plan: HashMap<&str, Vec<PlanMapping>> = HashMap::new();
        for m in mappings {
            by_plan.entry(m.plan_id.as_str()).or_default().push(m.clone());
        }

        let dangling = by_plan
            .keys()
            .filter(|id| !plans.iter().any(|p| p.plan_id == **id))
            .count();
        if dangling > 0 {
            tracing::debug!(dangling, "存在引用未知计划的映射,已忽略");
        }

        plans
            .iter()
            .map(|plan| {
                let plan_mappings = by_plan
                    .get(plan.plan_id.as_str())
                    .map(|v| v.as_slice())
                    .unwrap_or(&[]);
                self.calculate_progress(plan, plan_mappings, reports)
            })
            .collect()
    }

    /// 单条映射的匹配件数与小计
    pub fn sum_mapping(&self, mapping: &PlanMapping, reports: &[Report]) -> MappingContribution {
        let (matched_reports, subtotal) = reports
            .iter()
            .filter(|r| mapping.filters.matches(r))
            .fold((0usize, 0i64), |(n, sum), r| {
                (n + 1, sum.saturating_add(r.count_of(mapping.count_column)))
            });

        MappingContribution {
            mapping: mapping.clone(),
            matched_reports,
            subtotal,
        }
    }
}

/// 实绩与目标比较
///
/// # 返回
/// (remaining, progress_ratio, status)
///
/// target ≤ 0 视为已完成 (进度率 1.0,剩余 0)
pub fn evaluate_against_target(target_qty: i64, total: i64) -> (i64, f64, ProgressStatus) {
    if target_qty <= 0 {
        return (0, 1.0, ProgressStatus::Complete);
    }

    let remaining = target_qty.saturating_sub(total).max(0);
    let ratio = (total as f64 / target_qty as f64).clamp(0.0, 1.0);
    let status = if total >= target_qty {
        ProgressStatus::Complete
    } else {
        ProgressStatus::InProgress
    };

    (remaining, ratio, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::MappingFilters;
    use crate::domain::types::{CountColumn, FieldFilter};
    use chrono::NaiveDate;

    fn plan(target_qty: i64) -> Plan {
        let due = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();
        Plan {
            plan_id: "p0001".to_string(),
            name: "UA25 10月".to_string(),
            target_qty,
            due_date: due,
            created_at: due.and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    fn report(machine: &str, ground_ok: i64, rubber_ok: i64) -> Report {
        Report {
            timestamp: NaiveDate::from_ymd_opt(2026, 10, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            factory: "本社工場".to_string(),
            worker: "廣瀬".to_string(),
            line: "外径ライン".to_string(),
            model: "UA25".to_string(),
            process_lot: "L-01".to_string(),
            product: "SHI".to_string(),
            machine: machine.to_string(),
            ground_ok,
            ground_ng: 3,
            rubber_ok,
            rubber_ng: 1,
            note: String::new(),
        }
    }

    fn mapping(machine: FieldFilter, column: CountColumn) -> PlanMapping {
        PlanMapping {
            plan_id: "p0001".to_string(),
            filters: MappingFilters {
                machine,
                ..MappingFilters::default()
            },
            count_column: column,
        }
    }

    #[test]
    fn test_evaluate_zero_target_is_complete() {
        assert_eq!(evaluate_against_target(0, 0), (0, 1.0, ProgressStatus::Complete));
        assert_eq!(evaluate_against_target(-5, 10), (0, 1.0, ProgressStatus::Complete));
    }

    #[test]
    fn test_evaluate_partial_progress() {
        let (remaining, ratio, status) = evaluate_against_target(1000, 250);
        assert_eq!(remaining, 750);
        assert!((ratio - 0.25).abs() < f64::EPSILON);
        assert_eq!(status, ProgressStatus::InProgress);
    }

    #[test]
    fn test_defect_counts_never_summed() {
        let engine = ProgressAggregator::new();
        let reports = vec![report("T11J", 0, 0)];
        let progress = engine.calculate_progress(
            &plan(10),
            &[mapping(FieldFilter::Unspecified, CountColumn::GroundOk)],
            &reports,
        );
        assert_eq!(progress.total, 0);
        assert_eq!(progress.contributions[0].matched_reports, 1);
    }

    #[test]
    fn test_column_selection() {
        let engine = ProgressAggregator::new();
        let reports = vec![report("T11J", 40, 7)];
        let p = plan(100);

        let ground = engine.calculate_progress(
            &p,
            &[mapping(FieldFilter::value("T11J"), CountColumn::GroundOk)],
            &reports,
        );
        let rubber = engine.calculate_progress(
            &p,
            &[mapping(FieldFilter::value("T11J"), CountColumn::RubberOk)],
            &reports,
        );
        assert_eq!(ground.total, 40);
        assert_eq!(rubber.total, 7);
    }

    #[test]
    fn test_mappings_of_other_plans_ignored() {
        let engine = ProgressAggregator::new();
        let mut foreign = mapping(FieldFilter::Unspecified, CountColumn::GroundOk);
        foreign.plan_id = "other".to_string();

        let progress = engine.calculate_progress(&plan(100), &[foreign], &[report("T11J", 50, 0)]);
        assert_eq!(progress.total, 0);
        assert!(progress.contributions.is_empty());
    }

    #[test]
    fn test_huge_counts_saturate() {
        let engine = ProgressAggregator::new();
        let half = i64::MAX / 2 + 1;
        let reports = vec![report("T11J", half, 0), report("T11J", half, 0)];
        let all = mapping(FieldFilter::Unspecified, CountColumn::GroundOk);

        let progress = engine.calculate_progress(&plan(1000), &[all.clone(), all], &reports);
        assert_eq!(progress.contributions[0].subtotal, i64::MAX);
        assert_eq!(progress.total, i64::MAX);
        assert_eq!(progress.remaining, 0);
        assert_eq!(progress.status, ProgressStatus::Complete);
    }

    #[test]
    fn test_evaluate_negative_total_does_not_overflow() {
        let (remaining, ratio, status) = evaluate_against_target(i64::MAX, i64::MIN);
        assert_eq!(remaining, i64::MAX);
        assert_eq!(ratio, 0.0);
        assert_eq!(status, ProgressStatus::InProgress);
    }

    #[test]
    fn test_calculate_all_tolerates_dangling_mapping() {
        let engine = ProgressAggregator::new();
        let mut dangling = mapping(FieldFilter::Unspecified, CountColumn::GroundOk);
        dangling.plan_id = "missing".to_string();
        let own = mapping(FieldFilter::Unspecified, CountColumn::GroundOk);

        let result = engine.calculate_all(&[plan(100)], &[dangling, own], &[report("T11J", 30, 0)]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total, 30);
    }
}
