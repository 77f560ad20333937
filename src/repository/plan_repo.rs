// ==========================================
// 作業日報システム - 生产计划数据仓储
// ==========================================
// 表: Plans / PlanSettings / Schedule / CountingRules
// 红线: Repository 不含业务逻辑; 映射的 plan_id 不做外键校验
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

use crate::domain::plan::{CountingRule, MappingFilters, Plan, PlanMapping, ScheduleEntry};
use crate::domain::types::{CountColumn, FieldFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::report_repo::TIMESTAMP_FORMAT;
use crate::repository::sheet::{
    SheetRecord, SheetRow, TableSchema, COUNTING_RULES_SCHEMA, PLANS_SCHEMA,
    PLAN_SETTINGS_SCHEMA, SCHEDULE_SCHEMA,
};
use crate::repository::table_store::{append_record, read_records, TableStore};

/// 日期存储格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn decode_error(table: &str, row: usize, message: String) -> RepositoryError {
    RepositoryError::RowDecodeError {
        table: table.to_string(),
        row,
        message,
    }
}

fn parse_date(table: &str, row: &SheetRow, field: &str, row_no: usize) -> RepositoryResult<NaiveDate> {
    let raw = row.text(field);
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| decode_error(table, row_no, format!("{}={}: {}", field, raw, e)))
}

fn parse_column(table: &str, row: &SheetRow, field: &str, row_no: usize) -> RepositoryResult<CountColumn> {
    row.text(field)
        .parse::<CountColumn>()
        .map_err(|message| decode_error(table, row_no, message))
}

// ==========================================
// 记录编解码
// ==========================================

impl SheetRecord for Plan {
    fn schema() -> &'static TableSchema {
        &PLANS_SCHEMA
    }

    fn to_row(&self) -> SheetRow {
        SheetRow::new()
            .with("plan_id", &self.plan_id)
            .with("name", &self.name)
            .with("target_qty", self.target_qty)
            .with("due_date", self.due_date.format(DATE_FORMAT))
            .with("created_at", self.created_at.format(TIMESTAMP_FORMAT))
    }

    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self> {
        let plan_id = row.text("plan_id");
        if plan_id.is_empty() {
            return Err(decode_error("Plans", row_no, "plan_id 为空".to_string()));
        }

        // created_at 缺失不影响进度计算,回退到纳期零点
        let due_date = parse_date("Plans", row, "due_date", row_no)?;
        let created_at = NaiveDateTime::parse_from_str(&row.text("created_at"), TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| due_date.and_hms_opt(0, 0, 0).unwrap_or_default());

        Ok(Plan {
            plan_id,
            name: row.text("name"),
            target_qty: row.count("target_qty"),
            due_date,
            created_at,
        })
    }
}

impl SheetRecord for PlanMapping {
    fn schema() -> &'static TableSchema {
        &PLAN_SETTINGS_SCHEMA
    }

    fn to_row(&self) -> SheetRow {
        SheetRow::new()
            .with("plan_id", &self.plan_id)
            .with("factory", self.filters.factory.as_stored())
            .with("line", self.filters.line.as_stored())
            .with("machine", self.filters.machine.as_stored())
            .with("product", self.filters.product.as_stored())
            .with("model", self.filters.model.as_stored())
            .with("count_column", self.count_column.as_str())
    }

    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self> {
        Ok(PlanMapping {
            plan_id: row.text("plan_id"),
            filters: MappingFilters {
                factory: FieldFilter::parse(&row.text("factory")),
                line: FieldFilter::parse(&row.text("line")),
                machine: FieldFilter::parse(&row.text("machine")),
                product: FieldFilter::parse(&row.text("product")),
                model: FieldFilter::parse(&row.text("model")),
            },
            count_column: parse_column("PlanSettings", row, "count_column", row_no)?,
        })
    }
}

impl SheetRecord for ScheduleEntry {
    fn schema() -> &'static TableSchema {
        &SCHEDULE_SCHEMA
    }

    fn to_row(&self) -> SheetRow {
        SheetRow::new()
            .with("schedule_id", &self.schedule_id)
            .with("factory", &self.factory)
            .with("line", &self.line)
            .with("model", &self.model)
            .with("target_qty", self.target_qty)
            .with("scheduled_date", self.scheduled_date.format(DATE_FORMAT))
    }

    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self> {
        Ok(ScheduleEntry {
            schedule_id: row.text("schedule_id"),
            factory: row.text("factory"),
            line: row.text("line"),
            model: row.text("model"),
            target_qty: row.count("target_qty"),
            scheduled_date: parse_date("Schedule", row, "scheduled_date", row_no)?,
        })
    }
}

impl SheetRecord for CountingRule {
    fn schema() -> &'static TableSchema {
        &COUNTING_RULES_SCHEMA
    }

    fn to_row(&self) -> SheetRow {
        SheetRow::new()
            .with("factory", &self.factory)
            .with("line", &self.line)
            .with("model", &self.model)
            .with("target_machine", &self.target_machine)
            .with("target_column", self.target_column.as_str())
    }

    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self> {
        Ok(CountingRule {
            factory: row.text("factory"),
            line: row.text("line"),
            model: row.text("model"),
            target_machine: row.text("target_machine"),
            target_column: parse_column("CountingRules", row, "target_column", row_no)?,
        })
    }
}

// ==========================================
// PlanRepository - 生产计划仓储
// ==========================================
pub struct PlanRepository {
    store: Arc<dyn TableStore>,
}

impl PlanRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// 创建计划
    ///
    /// # 返回
    /// - `Ok(plan_id)`: 成功
    pub fn create(&self, plan: &Plan) -> RepositoryResult<String> {
        append_record(self.store.as_ref(), plan)?;
        Ok(plan.plan_id.clone())
    }

    /// 查询全部计划 (追加顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Plan>> {
        read_records(self.store.as_ref())
    }

    /// 按 plan_id 查询 (重复 id 取第一条)
    pub fn find_by_id(&self, plan_id: &str) -> RepositoryResult<Option<Plan>> {
        Ok(self.list_all()?.into_iter().find(|p| p.plan_id == plan_id))
    }
}

// ==========================================
// PlanMappingRepository - 计划映射仓储
// ==========================================
pub struct PlanMappingRepository {
    store: Arc<dyn TableStore>,
}

impl PlanMappingRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub fn append(&self, mapping: &PlanMapping) -> RepositoryResult<()> {
        append_record(self.store.as_ref(), mapping)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<PlanMapping>> {
        read_records(self.store.as_ref())
    }

    pub fn list_by_plan(&self, plan_id: &str) -> RepositoryResult<Vec<PlanMapping>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|m| m.plan_id == plan_id)
            .collect())
    }
}

// ==========================================
// ScheduleRepository - 排程仓储 (规则型变体)
// ==========================================
pub struct ScheduleRepository {
    store: Arc<dyn TableStore>,
}

impl ScheduleRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub fn append(&self, entry: &ScheduleEntry) -> RepositoryResult<()> {
        append_record(self.store.as_ref(), entry)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<ScheduleEntry>> {
        read_records(self.store.as_ref())
    }
}

// ==========================================
// CountingRuleRepository - 计数规则仓储 (规则型变体)
// ==========================================
pub struct CountingRuleRepository {
    store: Arc<dyn TableStore>,
}

impl CountingRuleRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    pub fn append(&self, rule: &CountingRule) -> RepositoryResult<()> {
        append_record(self.store.as_ref(), rule)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<CountingRule>> {
        read_records(self.store.as_ref())
    }
}
