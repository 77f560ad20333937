// ==========================================
// 作業日報システム - 生产计划领域模型
// ==========================================
// 包含: 计划 (Plan) / 计划映射 (PlanMapping) / 进度结果
// 以及早期规则型变体: 排程 (ScheduleEntry) / 计数规则 (CountingRule)
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::report::Report;
use crate::domain::types::{CountColumn, FieldFilter, ProgressStatus};

// ==========================================
// Plan - 生产计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: String,           // 计划ID (短ID)
    pub name: String,              // 计划名称
    pub target_qty: i64,           // 目标数量
    pub due_date: NaiveDate,       // 纳期
    pub created_at: NaiveDateTime, // 创建时间
}

// ==========================================
// MappingFilters - 映射过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingFilters {
    pub factory: FieldFilter,
    pub line: FieldFilter,
    pub machine: FieldFilter,
    pub product: FieldFilter,
    pub model: FieldFilter,
}

impl MappingFilters {
    /// 所有已指定条件 AND 匹配
    pub fn matches(&self, report: &Report) -> bool {
        self.factory.matches(&report.factory)
            && self.line.matches(&report.line)
            && self.machine.matches(&report.machine)
            && self.product.matches(&report.product)
            && self.model.matches(&report.model)
    }

    /// 按存储往返后的含义规范化 (去空白、哨兵值 → Unspecified)
    pub fn normalized(&self) -> Self {
        let norm = |f: &FieldFilter| FieldFilter::parse(f.as_stored());
        Self {
            factory: norm(&self.factory),
            line: norm(&self.line),
            machine: norm(&self.machine),
            product: norm(&self.product),
            model: norm(&self.model),
        }
    }

    /// 指定了值但值为空白的字段名
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("factory", &self.factory),
            ("line", &self.line),
            ("machine", &self.machine),
            ("product", &self.product),
            ("model", &self.model),
        ]
        .into_iter()
        .filter(|(_, f)| matches!(f, FieldFilter::Value(v) if v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

// ==========================================
// PlanMapping - 计划映射 (日报 → 计划)
// ==========================================
// 同一计划可有多条映射,各自独立求和 (重叠时会重复计数)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMapping {
    pub plan_id: String,
    pub filters: MappingFilters,
    pub count_column: CountColumn,
}

// ==========================================
// ScheduleEntry - 排程 (规则型变体)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub schedule_id: String,
    pub factory: String,
    pub line: String,
    pub model: String,
    pub target_qty: i64,
    pub scheduled_date: NaiveDate,
}

// ==========================================
// CountingRule - 计数规则 (规则型变体)
// ==========================================
// 每个 (factory, line, model) 一条规则,已被 PlanMapping 取代,两者不组合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingRule {
    pub factory: String,
    pub line: String,
    pub model: String,
    pub target_machine: String,
    pub target_column: CountColumn,
}

impl CountingRule {
    pub fn applies_to(&self, entry: &ScheduleEntry) -> bool {
        self.factory == entry.factory && self.line == entry.line && self.model == entry.model
    }
}

// ==========================================
// 进度结果
// ==========================================

/// 单条映射的贡献明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingContribution {
    pub mapping: PlanMapping,
    pub matched_reports: usize,
    pub subtotal: i64,
}

/// 计划进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub plan: Plan,
    pub total: i64,
    pub remaining: i64,
    pub progress_ratio: f64,
    pub status: ProgressStatus,
    pub contributions: Vec<MappingContribution>,
}

/// 排程进度 (规则型变体)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleProgress {
    pub schedule: ScheduleEntry,
    pub rule: Option<CountingRule>,
    pub total: i64,
    pub remaining: i64,
    pub progress_ratio: f64,
    pub status: ProgressStatus,
}
