// ==========================================
// 作業日報システム - 表格行编解码
// ==========================================
// 后端是"工作表"式的扁平表: 固定表头 + 文本值
// 红线: 行按字段名读写,禁止依赖追加时的列位置
// 红线: 每张表带 schema 版本,布局变化时显式报错而不是静默错位
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::repository::error::RepositoryResult;

// ==========================================
// TableKind - 逻辑表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Reports,       // 作业日报
    Settings,      // 主数据 (下拉选项)
    Plans,         // 生产计划
    PlanSettings,  // 计划映射
    Schedule,      // 排程 (规则型变体)
    CountingRules, // 计数规则 (规则型变体)
}

// ==========================================
// TableNames - 物理表名 (可配置)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub reports: String,
    pub settings: String,
    pub plans: String,
    pub plan_settings: String,
    pub schedule: String,
    pub counting_rules: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            reports: "Reports".to_string(),
            settings: "Settings".to_string(),
            plans: "Plans".to_string(),
            plan_settings: "PlanSettings".to_string(),
            schedule: "Schedule".to_string(),
            counting_rules: "CountingRules".to_string(),
        }
    }
}

impl TableNames {
    pub fn name_of(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Reports => &self.reports,
            TableKind::Settings => &self.settings,
            TableKind::Plans => &self.plans,
            TableKind::PlanSettings => &self.plan_settings,
            TableKind::Schedule => &self.schedule,
            TableKind::CountingRules => &self.counting_rules,
        }
    }
}

// ==========================================
// TableSchema - 表头 + 版本
// ==========================================
#[derive(Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub kind: TableKind,
    pub version: u32,
    pub header: &'static [&'static str],
}

impl TableSchema {
    pub fn header_matches(&self, actual: &[String]) -> bool {
        actual.len() == self.header.len()
            && self.header.iter().zip(actual.iter()).all(|(e, a)| *e == a.as_str())
    }

    pub fn header_text(&self) -> String {
        self.header.join(",")
    }
}

pub static REPORTS_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Reports,
    version: 2,
    header: &[
        "timestamp",
        "factory",
        "worker",
        "line",
        "model",
        "process_lot",
        "product",
        "machine",
        "ground_ok",
        "ground_ng",
        "rubber_ok",
        "rubber_ng",
        "note",
    ],
};

pub static SETTINGS_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Settings,
    version: 1,
    header: &["factory", "category", "value"],
};

pub static PLANS_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Plans,
    version: 1,
    header: &["plan_id", "name", "target_qty", "due_date", "created_at"],
};

pub static PLAN_SETTINGS_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::PlanSettings,
    version: 1,
    header: &["plan_id", "factory", "line", "machine", "product", "model", "count_column"],
};

pub static SCHEDULE_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Schedule,
    version: 1,
    header: &["schedule_id", "factory", "line", "model", "target_qty", "scheduled_date"],
};

pub static COUNTING_RULES_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::CountingRules,
    version: 1,
    header: &["factory", "line", "model", "target_machine", "target_column"],
};

/// 全部表结构 (建表/校验用)
pub static ALL_SCHEMAS: [&TableSchema; 6] = [
    &REPORTS_SCHEMA,
    &SETTINGS_SCHEMA,
    &PLANS_SCHEMA,
    &PLAN_SETTINGS_SCHEMA,
    &SCHEDULE_SCHEMA,
    &COUNTING_RULES_SCHEMA,
];

// ==========================================
// SheetRow - 命名字段行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    values: BTreeMap<String, String>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl ToString) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl ToString) {
        self.values.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|s| s.as_str())
    }

    /// 取字段文本,缺失时为空串
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(|s| s.trim().to_string()).unwrap_or_default()
    }

    /// 取计数字段,非数值/缺失一律为 0
    pub fn count(&self, field: &str) -> i64 {
        coerce_count(self.get(field).unwrap_or(""))
    }

    /// 按表头顺序导出值 (缺失字段为空串)
    pub fn to_values(&self, schema: &TableSchema) -> Vec<String> {
        schema
            .header
            .iter()
            .map(|h| self.values.get(*h).cloned().unwrap_or_default())
            .collect()
    }

    /// 由表头与值构造 (长度不一致时多余值丢弃,缺失值为空)
    pub fn from_values<S: AsRef<str>>(header: &[S], values: Vec<String>) -> Self {
        let mut row = SheetRow::new();
        let mut values = values.into_iter();
        for h in header {
            row.set(h.as_ref(), values.next().unwrap_or_default());
        }
        row
    }
}

/// 计数文本强制转换: 整数 → 原值; 小数 → 截断; 其他 → 0
pub fn coerce_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

// ==========================================
// SheetRecord - 记录 ↔ 行
// ==========================================
pub trait SheetRecord: Sized {
    fn schema() -> &'static TableSchema;

    fn to_row(&self) -> SheetRow;

    /// `row_no` 从 1 开始,仅用于错误信息
    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self>;
}
