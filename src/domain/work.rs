// ==========================================
// 作業日報システム - 作业过程记录
// ==========================================
// 開始 / 段取り / 中断 / 再開 / 終了 的事件与汇总
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::SetupKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkEventKind {
    Started,
    SetupBegan(SetupKind),
    Interrupted { reason: String },
    Resumed,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEvent {
    pub at: NaiveDateTime,
    pub kind: WorkEventKind,
}

/// 作业结束时的汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSummary {
    pub started_at: Option<NaiveDateTime>,
    pub finished_at: NaiveDateTime,
    pub setup_count: usize,
    pub interruption_count: usize,
    pub interrupted_minutes: i64,
}
