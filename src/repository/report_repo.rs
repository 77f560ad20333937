// ==========================================
// 作業日報システム - 作业日报仓储 (Reports 表)
// ==========================================
// 只追加; 计数字段非数值时按 0 解码
// ==========================================

use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::domain::report::Report;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sheet::{SheetRecord, SheetRow, TableSchema, REPORTS_SCHEMA};
use crate::repository::table_store::{append_record, read_records, TableStore};

/// 日报时间戳存储格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl SheetRecord for Report {
    fn schema() -> &'static TableSchema {
        &REPORTS_SCHEMA
    }

    fn to_row(&self) -> SheetRow {
        SheetRow::new()
            .with("timestamp", self.timestamp.format(TIMESTAMP_FORMAT))
            .with("factory", &self.factory)
            .with("worker", &self.worker)
            .with("line", &self.line)
            .with("model", &self.model)
            .with("process_lot", &self.process_lot)
            .with("product", &self.product)
            .with("machine", &self.machine)
            .with("ground_ok", self.ground_ok)
            .with("ground_ng", self.ground_ng)
            .with("rubber_ok", self.rubber_ok)
            .with("rubber_ng", self.rubber_ng)
            .with("note", &self.note)
    }

    fn from_row(row: &SheetRow, row_no: usize) -> RepositoryResult<Self> {
        let raw_ts = row.text("timestamp");
        let timestamp = NaiveDateTime::parse_from_str(&raw_ts, TIMESTAMP_FORMAT).map_err(|e| {
            RepositoryError::RowDecodeError {
                table: "Reports".to_string(),
                row: row_no,
                message: format!("timestamp={}: {}", raw_ts, e),
            }
        })?;

        Ok(Report {
            timestamp,
            factory: row.text("factory"),
            worker: row.text("worker"),
            line: row.text("line"),
            model: row.text("model"),
            process_lot: row.text("process_lot"),
            product: row.text("product"),
            machine: row.text("machine"),
            ground_ok: row.count("ground_ok"),
            ground_ng: row.count("ground_ng"),
            rubber_ok: row.count("rubber_ok"),
            rubber_ng: row.count("rubber_ng"),
            note: row.get("note").unwrap_or("").to_string(),
        })
    }
}

// ==========================================
// ReportRepository
// ==========================================
pub struct ReportRepository {
    store: Arc<dyn TableStore>,
}

impl ReportRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// 追加日报
    pub fn append(&self, report: &Report) -> RepositoryResult<()> {
        append_record(self.store.as_ref(), report)
    }

    /// 读取全部日报 (追加顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Report>> {
        read_records(self.store.as_ref())
    }

    /// 按工厂过滤 (精确匹配)
    pub fn list_by_factory(&self, factory: &str) -> RepositoryResult<Vec<Report>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|r| r.factory == factory)
            .collect())
    }
}
