// ==========================================
// 作業日報システム - 生产计划上传解析
// ==========================================
// 流程: 文件解析 → 表头别名映射 → 行校验 → 候选计划 / 拒绝行
// 持久化与 plan_id 生成由 API 层负责
// ==========================================

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};

/// 计划名列的别名
pub const NAME_ALIASES: [&str; 2] = ["計画名", "name"];
/// 目标数量列的别名
pub const TARGET_QTY_ALIASES: [&str; 2] = ["目標数量", "target_qty"];
/// 纳期列的别名
pub const DUE_DATE_ALIASES: [&str; 2] = ["納期", "due_date"];

/// Excel 序列日期的起点 (1900 闰年问题已包含在内)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Excel 可表示的最大序列值 (9999-12-31)
const EXCEL_MAX_SERIAL: i64 = 2_958_465;

/// 通过校验的计划行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCandidate {
    pub row: usize,
    pub name: String,
    pub target_qty: i64,
    pub due_date: NaiveDate,
}

/// 被拒绝的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanImportBatch {
    pub candidates: Vec<PlanCandidate>,
    pub rejected: Vec<RowRejection>,
}

struct ColumnMap {
    name: String,
    target_qty: String,
    due_date: String,
}

fn resolve_column(headers: &[String], aliases: &[&str]) -> ImportResult<String> {
    headers
        .iter()
        .find(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
        .cloned()
        .ok_or_else(|| ImportError::MissingColumn(aliases.join("|")))
}

// ==========================================
// PlanImporter
// ==========================================
pub struct PlanImporter {
    parser: UniversalFileParser,
}

impl Default for PlanImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 解析上传文件
    ///
    /// # 返回
    /// - `Ok(batch)`: 行级问题记录在 `rejected` 中
    /// - `Err`: 文件无法读取,或缺少必需列
    pub fn parse_file(&self, path: &Path) -> ImportResult<PlanImportBatch> {
        let (headers, records) = self.parser.parse(path)?;
        let batch = self.parse_records(&headers, &records)?;

        tracing::info!(
            file = %path.display(),
            accepted = batch.candidates.len(),
            rejected = batch.rejected.len(),
            "计划文件解析完成"
        );
        Ok(batch)
    }

    pub fn parse_records(&self, headers: &[String], records: &[RawRecord]) -> ImportResult<PlanImportBatch> {
        let columns = ColumnMap {
            name: resolve_column(headers, &NAME_ALIASES)?,
            target_qty: resolve_column(headers, &TARGET_QTY_ALIASES)?,
            due_date: resolve_column(headers, &DUE_DATE_ALIASES)?,
        };

        let mut batch = PlanImportBatch::default();
        for record in records {
            match Self::parse_row(&columns, record) {
                Ok(candidate) => batch.candidates.push(candidate),
                Err(reason) => {
                    tracing::warn!(row = record.row, %reason, "计划行被拒绝");
                    batch.rejected.push(RowRejection {
                        row: record.row,
                        reason,
                    });
                }
            }
        }

        Ok(batch)
    }

    fn parse_row(columns: &ColumnMap, record: &RawRecord) -> Result<PlanCandidate, String> {
        let name = record.get(&columns.name).unwrap_or("").trim().to_string();
        if name.is_empty() {
            return Err("計画名が空です".to_string());
        }

        let raw_qty = record.get(&columns.target_qty).unwrap_or("");
        let target_qty = parse_quantity(raw_qty)
            .ok_or_else(|| format!("目標数量が不正です: {}", raw_qty))?;
        if target_qty <= 0 {
            return Err(format!("目標数量は正の整数が必要です: {}", raw_qty));
        }

        let raw_date = record.get(&columns.due_date).unwrap_or("");
        let due_date = parse_due_date(raw_date).ok_or_else(|| format!("納期が不正です: {}", raw_date))?;

        Ok(PlanCandidate {
            row: record.row,
            name,
            target_qty,
            due_date,
        })
    }
}

/// 解析数量: 允许千位分隔符与 Excel 的 "1000.0" 形式
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(n) = cleaned.parse::<i64>() {
        return Some(n);
    }

    let f = cleaned.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// 解析纳期
///
/// 支持: YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD / Excel 序列值
/// 带时间部分时只取日期
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date_part = raw.split(|c| c == ' ' || c == 'T').next().unwrap_or(raw);
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }

    // 8 位数字已按 YYYYMMDD 处理,其余数字视为 Excel 序列值
    let serial = raw.parse::<f64>().ok()?;
    if !serial.is_finite() || serial < 1.0 || serial > EXCEL_MAX_SERIAL as f64 {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(Duration::days(serial.trunc() as i64))
}
