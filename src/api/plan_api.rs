// ==========================================
// 作業日報システム - 生产计划 API
// ==========================================
// 职责: 计划创建/上传、计划映射登记、规则型排程登记
// 权限: 写操作仅限管理员
// ==========================================

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_admin, require_non_empty, require_positive};
use crate::domain::plan::{CountingRule, MappingFilters, Plan, PlanMapping, ScheduleEntry};
use crate::domain::session::SessionContext;
use crate::domain::types::CountColumn;
use crate::importer::{PlanImporter, RowRejection};
use crate::repository::{
    CountingRuleRepository, PlanMappingRepository, PlanRepository, ScheduleRepository,
};

/// plan_id 长度 (UUID v4 前 8 位)
pub const PLAN_ID_LEN: usize = 8;
/// 碰撞时的最大生成次数
pub const MAX_ID_ATTEMPTS: usize = 5;

/// 上传结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanImportResult {
    /// 创建成功的 plan_id (文件顺序)
    pub imported: Vec<String>,
    pub rejected: Vec<RowRejection>,
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..PLAN_ID_LEN].to_string()
}

// ==========================================
// PlanApi
// ==========================================
pub struct PlanApi {
    plan_repo: Arc<PlanRepository>,
    mapping_repo: Arc<PlanMappingRepository>,
    schedule_repo: Arc<ScheduleRepository>,
    rule_repo: Arc<CountingRuleRepository>,
    importer: PlanImporter,
}

impl PlanApi {
    pub fn new(
        plan_repo: Arc<PlanRepository>,
        mapping_repo: Arc<PlanMappingRepository>,
        schedule_repo: Arc<ScheduleRepository>,
        rule_repo: Arc<CountingRuleRepository>,
    ) -> Self {
        Self {
            plan_repo,
            mapping_repo,
            schedule_repo,
            rule_repo,
            importer: PlanImporter::new(),
        }
    }

    fn generate_plan_id(&self, taken: &HashSet<String>) -> ApiResult<String> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = short_id();
            if !taken.contains(&id) {
                return Ok(id);
            }
            tracing::debug!(attempt, plan_id = %id, "plan_id 碰撞,重新生成");
        }
        Err(ApiError::InternalError(format!(
            "plan_id 生成失败 ({} 次碰撞)",
            MAX_ID_ATTEMPTS
        )))
    }

    fn existing_ids(&self) -> ApiResult<HashSet<String>> {
        Ok(self
            .plan_repo
            .list_all()?
            .into_iter()
            .map(|p| p.plan_id)
            .collect())
    }

    fn insert_plan(
        &self,
        taken: &mut HashSet<String>,
        name: &str,
        target_qty: i64,
        due_date: NaiveDate,
    ) -> ApiResult<String> {
        require_non_empty("計画名", name)?;
        require_positive("目標数量", target_qty)?;

        let plan = Plan {
            plan_id: self.generate_plan_id(taken)?,
            name: name.trim().to_string(),
            target_qty,
            due_date,
            created_at: Local::now().naive_local(),
        };

        let plan_id = self.plan_repo.create(&plan)?;
        taken.insert(plan_id.clone());
        tracing::info!(plan_id = %plan_id, name = %plan.name, target_qty, %due_date, "计划已创建");
        Ok(plan_id)
    }

    // ==========================================
    // 计划
    // ==========================================

    /// 创建计划
    ///
    /// # 返回
    /// - `Ok(plan_id)`: 8 位十六进制
    pub fn create_plan(
        &self,
        session: &SessionContext,
        name: &str,
        target_qty: i64,
        due_date: NaiveDate,
    ) -> ApiResult<String> {
        require_admin(session)?;
        let mut taken = self.existing_ids()?;
        self.insert_plan(&mut taken, name, target_qty, due_date)
    }

    /// 全部计划 (存储不可用时为空)
    pub fn list_plans(&self) -> Vec<Plan> {
        self.plan_repo.list_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "计划读取失败,按空列表处理");
            Vec::new()
        })
    }

    /// 上传计划文件 (CSV / Excel)
    ///
    /// 不合格行逐行报告并跳过; 合格行逐个创建
    pub fn import_plans(&self, session: &SessionContext, path: &Path) -> ApiResult<PlanImportResult> {
        require_admin(session)?;

        let batch = self.importer.parse_file(path)?;
        let mut taken = self.existing_ids()?;
        let mut result = PlanImportResult {
            imported: Vec::with_capacity(batch.candidates.len()),
            rejected: batch.rejected,
        };

        for candidate in batch.candidates {
            match self.insert_plan(&mut taken, &candidate.name, candidate.target_qty, candidate.due_date) {
                Ok(plan_id) => result.imported.push(plan_id),
                // 存储不可用时后续行同样会失败,整体报错
                Err(e) if e.is_store_unavailable() => return Err(e),
                Err(e) => result.rejected.push(RowRejection {
                    row: candidate.row,
                    reason: e.to_string(),
                }),
            }
        }

        result.rejected.sort_by_key(|r| r.row);
        tracing::info!(
            file = %path.display(),
            imported = result.imported.len(),
            rejected = result.rejected.len(),
            "计划上传完成"
        );
        Ok(result)
    }

    // ==========================================
    // 计划映射
    // ==========================================

    /// 登记计划映射
    ///
    /// 引用不存在的计划时仅记录警告,照常追加
    pub fn add_mapping(
        &self,
        session: &SessionContext,
        plan_id: &str,
        filters: MappingFilters,
        count_column: CountColumn,
    ) -> ApiResult<()> {
        require_admin(session)?;
        require_non_empty("計画ID", plan_id)?;

        let blank = filters.blank_fields();
        if !blank.is_empty() {
            return Err(ApiError::ValidationFailure(format!(
                "絞り込み条件が空です: {}",
                blank.join(", ")
            )));
        }

        match self.plan_repo.find_by_id(plan_id) {
            Ok(Some(_)) => {}
            Ok(None) => tracing::warn!(plan_id, "映射引用了不存在的计划"),
            Err(e) => tracing::warn!(plan_id, error = %e, "计划存在性确认失败,照常追加"),
        }

        let mapping = PlanMapping {
            plan_id: plan_id.trim().to_string(),
            filters: filters.normalized(),
            count_column,
        };
        self.mapping_repo.append(&mapping)?;
        tracing::info!(plan_id, column = %count_column, "计划映射已登记");
        Ok(())
    }

    /// 映射列表 (存储不可用时为空)
    pub fn list_mappings(&self, plan_id: Option<&str>) -> Vec<PlanMapping> {
        let result = match plan_id {
            Some(id) => self.mapping_repo.list_by_plan(id),
            None => self.mapping_repo.list_all(),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(?plan_id, error = %e, "映射读取失败,按空列表处理");
            Vec::new()
        })
    }

    // ==========================================
    // 规则型排程
    // ==========================================

    /// 登记排程
    ///
    /// # 返回
    /// - `Ok(schedule_id)`
    pub fn add_schedule_entry(
        &self,
        session: &SessionContext,
        factory: &str,
        line: &str,
        model: &str,
        target_qty: i64,
        scheduled_date: NaiveDate,
    ) -> ApiResult<String> {
        require_admin(session)?;
        require_non_empty("工場", factory)?;
        require_non_empty("ライン種別", line)?;
        require_non_empty("型番", model)?;
        require_positive("目標数量", target_qty)?;

        let entry = ScheduleEntry {
            schedule_id: Uuid::new_v4().to_string(),
            factory: factory.trim().to_string(),
            line: line.trim().to_string(),
            model: model.trim().to_string(),
            target_qty,
            scheduled_date,
        };
        self.schedule_repo.append(&entry)?;
        tracing::info!(schedule_id = %entry.schedule_id, factory, line, model, "排程已登记");
        Ok(entry.schedule_id)
    }

    /// 登记计数规则
    pub fn add_counting_rule(&self, session: &SessionContext, rule: CountingRule) -> ApiResult<()> {
        require_admin(session)?;
        require_non_empty("工場", &rule.factory)?;
        require_non_empty("ライン種別", &rule.line)?;
        require_non_empty("型番", &rule.model)?;
        require_non_empty("対象機械", &rule.target_machine)?;

        self.rule_repo.append(&rule)?;
        tracing::info!(
            factory = %rule.factory,
            line = %rule.line,
            model = %rule.model,
            machine = %rule.target_machine,
            "计数规则已登记"
        );
        Ok(())
    }

    pub fn list_schedule(&self) -> Vec<ScheduleEntry> {
        self.schedule_repo.list_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "排程读取失败,按空列表处理");
            Vec::new()
        })
    }

    pub fn list_counting_rules(&self) -> Vec<CountingRule> {
        self.rule_repo.list_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "计数规则读取失败,按空列表处理");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_is_8_hex() {
        let id = short_id();
        assert_eq!(id.len(), PLAN_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
