// ==========================================
// 作業日報システム - 作业日报领域模型
// ==========================================
// 红线: 日报一经追加不可修改,身份 = 追加顺序 / 时间戳
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::CountColumn;

/// 单条日报每个计数的上限
pub const MAX_REPORT_COUNT: i64 = 1_000_000_000;

// ==========================================
// Report - 作业日报 (一次提交一行)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: NaiveDateTime, // 提交时间
    pub factory: String,          // 工場
    pub worker: String,           // 作業者
    pub line: String,             // ライン種別
    pub model: String,            // 型番
    pub process_lot: String,      // 加工ロット
    pub product: String,          // 製品種別
    pub machine: String,          // 機械種別
    pub ground_ok: i64,           // 研削 研磨数
    pub ground_ng: i64,           // 研削 不良数
    pub rubber_ok: i64,           // ラバ研 研磨数
    pub rubber_ng: i64,           // ラバ研 不良数
    pub note: String,             // 備考
}

impl Report {
    /// 取进度汇总所用的良品计数
    pub fn count_of(&self, column: CountColumn) -> i64 {
        match column {
            CountColumn::GroundOk => self.ground_ok,
            CountColumn::RubberOk => self.rubber_ok,
        }
    }
}

// ==========================================
// ReportDraft - 画面输入的日报草稿
// ==========================================
// 工厂与时间戳由会话与提交时刻决定,不由画面输入
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub worker: String,
    pub line: String,
    pub model: String,
    pub process_lot: String,
    pub product: String,
    pub machine: String,
    pub ground_ok: i64,
    pub ground_ng: i64,
    pub rubber_ok: i64,
    pub rubber_ng: i64,
    pub note: String,
}

impl ReportDraft {
    pub fn into_report(self, factory: &str, timestamp: NaiveDateTime) -> Report {
        Report {
            timestamp,
            factory: factory.to_string(),
            worker: self.worker.trim().to_string(),
            line: self.line.trim().to_string(),
            model: self.model.trim().to_string(),
            process_lot: self.process_lot.trim().to_string(),
            product: self.product.trim().to_string(),
            machine: self.machine.trim().to_string(),
            ground_ok: self.ground_ok,
            ground_ng: self.ground_ng,
            rubber_ok: self.rubber_ok,
            rubber_ng: self.rubber_ng,
            note: self.note.trim().to_string(),
        }
    }
}

// ==========================================
// ProductionTotals - 实绩合计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionTotals {
    pub report_count: usize,
    pub ground_ok: i64,
    pub ground_ng: i64,
    pub rubber_ok: i64,
    pub rubber_ng: i64,
}

impl ProductionTotals {
    pub fn accumulate<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Self {
        reports.into_iter().fold(Self::default(), |mut acc, r| {
            acc.report_count += 1;
            acc.ground_ok = acc.ground_ok.saturating_add(r.ground_ok);
            acc.ground_ng = acc.ground_ng.saturating_add(r.ground_ng);
            acc.rubber_ok = acc.rubber_ok.saturating_add(r.rubber_ok);
            acc.rubber_ng = acc.rubber_ng.saturating_add(r.rubber_ng);
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report(ground_ok: i64, rubber_ng: i64) -> Report {
        ReportDraft {
            worker: "廣瀬".to_string(),
            line: "外径ライン".to_string(),
            model: "UA25".to_string(),
            product: "SHI".to_string(),
            machine: "T11J".to_string(),
            ground_ok,
            rubber_ng,
            ..ReportDraft::default()
        }
        .into_report(
            "本社工場",
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_totals_accumulate() {
        let totals = ProductionTotals::accumulate(&[report(120, 1), report(80, 2)]);
        assert_eq!(totals.report_count, 2);
        assert_eq!(totals.ground_ok, 200);
        assert_eq!(totals.rubber_ng, 3);
    }

    #[test]
    fn test_totals_saturate_on_huge_counts() {
        let half = i64::MAX / 2 + 1;
        let totals = ProductionTotals::accumulate(&[report(half, 0), report(half, 0)]);
        assert_eq!(totals.report_count, 2);
        assert_eq!(totals.ground_ok, i64::MAX);
    }
}
