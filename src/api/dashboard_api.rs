// ==========================================
// 作業日報システム - 进度看板 API
// ==========================================
// 每次调用都经缓存重新读取全部日报,计算在引擎中完成
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::plan::{PlanProgress, ScheduleProgress};
use crate::engine::{ProgressAggregator, RuleProgressEngine};
use crate::repository::{
    CountingRuleRepository, PlanMappingRepository, PlanRepository, ReportRepository,
    ScheduleRepository,
};

pub struct DashboardApi {
    plan_repo: Arc<PlanRepository>,
    mapping_repo: Arc<PlanMappingRepository>,
    report_repo: Arc<ReportRepository>,
    schedule_repo: Arc<ScheduleRepository>,
    rule_repo: Arc<CountingRuleRepository>,
    aggregator: Arc<ProgressAggregator>,
    rule_engine: Arc<RuleProgressEngine>,
}

impl DashboardApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plan_repo: Arc<PlanRepository>,
        mapping_repo: Arc<PlanMappingRepository>,
        report_repo: Arc<ReportRepository>,
        schedule_repo: Arc<ScheduleRepository>,
        rule_repo: Arc<CountingRuleRepository>,
        aggregator: Arc<ProgressAggregator>,
        rule_engine: Arc<RuleProgressEngine>,
    ) -> Self {
        Self {
            plan_repo,
            mapping_repo,
            report_repo,
            schedule_repo,
            rule_repo,
            aggregator,
            rule_engine,
        }
    }

    /// 单个计划的进度
    ///
    /// # 返回
    /// - `Err(NotFound)`: 计划不存在
    pub fn plan_progress(&self, plan_id: &str) -> ApiResult<PlanProgress> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)?
            .ok_or_else(|| ApiError::NotFound(format!("計画 {}", plan_id)))?;

        let mappings = self.mapping_repo.list_by_plan(plan_id)?;
        let reports = self.report_repo.list_all()?;

        Ok(self.aggregator.calculate_progress(&plan, &mappings, &reports))
    }

    /// 全部计划的进度 (计划登记顺序)
    ///
    /// 存储不可用时返回空列表
    pub fn list_plan_progress(&self) -> Vec<PlanProgress> {
        let loaded = (|| {
            Ok::<_, ApiError>((
                self.plan_repo.list_all()?,
                self.mapping_repo.list_all()?,
                self.report_repo.list_all()?,
            ))
        })();

        match loaded {
            Ok((plans, mappings, reports)) => self.aggregator.calculate_all(&plans, &mappings, &reports),
            Err(e) => {
                tracing::warn!(error = %e, "进度数据读取失败,按空列表处理");
                Vec::new()
            }
        }
    }

    /// 规则型排程进度
    ///
    /// # 参数
    /// - `today`: 判定延迟的基准日
    pub fn list_schedule_progress(&self, today: NaiveDate) -> Vec<ScheduleProgress> {
        let loaded = (|| {
            Ok::<_, ApiError>((
                self.schedule_repo.list_all()?,
                self.rule_repo.list_all()?,
                self.report_repo.list_all()?,
            ))
        })();

        match loaded {
            Ok((entries, rules, reports)) => {
                self.rule_engine
                    .calculate_all(&entries, &rules, &reports, today)
            }
            Err(e) => {
                tracing::warn!(error = %e, "排程数据读取失败,按空列表处理");
                Vec::new()
            }
        }
    }
}
