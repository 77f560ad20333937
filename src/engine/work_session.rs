// ==========================================
// 作業日報システム - 作业过程状态机
// ==========================================
// 開始前 --開始--> 作業中
// 開始前/作業中 --段取り--> 段取り中 --開始--> 作業中
// 作業中 --中断--> 中断中 --再開--> 作業中
// 作業中/中断中 --終了--> 終了
// ==========================================

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::types::{SetupKind, WorkStatus};
use crate::domain::work::{WorkEvent, WorkEventKind, WorkSummary};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkSessionError {
    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: WorkStatus, to: WorkStatus },

    #[error("中断原因不能为空")]
    MissingInterruptReason,
}

pub type WorkSessionResult<T> = Result<T, WorkSessionError>;

// ==========================================
// WorkSession
// ==========================================
#[derive(Debug, Clone)]
pub struct WorkSession {
    status: WorkStatus,
    events: Vec<WorkEvent>,
}

impl Default for WorkSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkSession {
    pub fn new() -> Self {
        Self {
            status: WorkStatus::BeforeStart,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> WorkStatus {
        self.status
    }

    pub fn events(&self) -> &[WorkEvent] {
        &self.events
    }

    fn transition(
        &mut self,
        allowed: &[WorkStatus],
        to: WorkStatus,
        at: NaiveDateTime,
        kind: WorkEventKind,
    ) -> WorkSessionResult<()> {
        if !allowed.contains(&self.status) {
            return Err(WorkSessionError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }
        tracing::debug!(from = %self.status, to = %to, "作业状态变更");
        self.status = to;
        self.events.push(WorkEvent { at, kind });
        Ok(())
    }

    /// 開始 (也用于段取り结束后开始生产)
    pub fn start(&mut self, at: NaiveDateTime) -> WorkSessionResult<()> {
        self.transition(
            &[WorkStatus::BeforeStart, WorkStatus::Setup],
            WorkStatus::Working,
            at,
            WorkEventKind::Started,
        )
    }

    /// 段取り
    pub fn begin_setup(&mut self, kind: SetupKind, at: NaiveDateTime) -> WorkSessionResult<()> {
        self.transition(
            &[WorkStatus::BeforeStart, WorkStatus::Working],
            WorkStatus::Setup,
            at,
            WorkEventKind::SetupBegan(kind),
        )
    }

    /// 中断 (需选择中断内容)
    pub fn interrupt(&mut self, reason: &str, at: NaiveDateTime) -> WorkSessionResult<()> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkSessionError::MissingInterruptReason);
        }
        self.transition(
            &[WorkStatus::Working],
            WorkStatus::Paused,
            at,
            WorkEventKind::Interrupted {
                reason: reason.to_string(),
            },
        )
    }

    /// 再開
    pub fn resume(&mut self, at: NaiveDateTime) -> WorkSessionResult<()> {
        self.transition(&[WorkStatus::Paused], WorkStatus::Working, at, WorkEventKind::Resumed)
    }

    /// 終了; 中断中直接终了时,中断时长计到终了时刻
    pub fn finish(&mut self, at: NaiveDateTime) -> WorkSessionResult<WorkSummary> {
        self.transition(
            &[WorkStatus::Working, WorkStatus::Paused],
            WorkStatus::Finished,
            at,
            WorkEventKind::Finished,
        )?;
        Ok(self.summarize(at))
    }

    fn summarize(&self, finished_at: NaiveDateTime) -> WorkSummary {
        let started_at = self
            .events
            .iter()
            .find(|e| e.kind == WorkEventKind::Started)
            .map(|e| e.at);

        let mut setup_count = 0;
        let mut interruption_count = 0;
        let mut interrupted_minutes = 0;
        let mut paused_since: Option<NaiveDateTime> = None;

        for event in &self.events {
            match &event.kind {
                WorkEventKind::SetupBegan(_) => setup_count += 1,
                WorkEventKind::Interrupted { .. } => {
                    interruption_count += 1;
                    paused_since = Some(event.at);
                }
                WorkEventKind::Resumed | WorkEventKind::Finished => {
                    if let Some(since) = paused_since.take() {
                        interrupted_minutes += (event.at - since).num_minutes().max(0);
                    }
                }
                WorkEventKind::Started => {}
            }
        }

        WorkSummary {
            started_at,
            finished_at,
            setup_count,
            interruption_count,
            interrupted_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_full_shift() {
        let mut ws = WorkSession::new();
        ws.begin_setup(SetupKind::Major, at(8, 0)).unwrap();
        ws.start(at(8, 30)).unwrap();
        ws.interrupt("材料待ち", at(10, 0)).unwrap();
        ws.resume(at(10, 20)).unwrap();
        ws.interrupt("休憩", at(12, 0)).unwrap();
        ws.resume(at(12, 45)).unwrap();

        let summary = ws.finish(at(17, 0)).unwrap();
        assert_eq!(ws.status(), WorkStatus::Finished);
        assert_eq!(summary.started_at, Some(at(8, 30)));
        assert_eq!(summary.setup_count, 1);
        assert_eq!(summary.interruption_count, 2);
        assert_eq!(summary.interrupted_minutes, 65);
    }

    #[test]
    fn test_finish_while_paused_counts_open_pause() {
        let mut ws = WorkSession::new();
        ws.start(at(9, 0)).unwrap();
        ws.interrupt("機械トラブル", at(15, 0)).unwrap();

        let summary = ws.finish(at(15, 30)).unwrap();
        assert_eq!(summary.interrupted_minutes, 30);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut ws = WorkSession::new();
        assert_eq!(
            ws.resume(at(9, 0)),
            Err(WorkSessionError::InvalidStateTransition {
                from: WorkStatus::BeforeStart,
                to: WorkStatus::Working,
            })
        );
        assert!(ws.finish(at(9, 0)).is_err());

        ws.start(at(9, 0)).unwrap();
        assert!(ws.start(at(9, 5)).is_err());
        assert_eq!(ws.events().len(), 1);
    }

    #[test]
    fn test_interrupt_requires_reason() {
        let mut ws = WorkSession::new();
        ws.start(at(9, 0)).unwrap();
        assert_eq!(
            ws.interrupt("  ", at(9, 10)),
            Err(WorkSessionError::MissingInterruptReason)
        );
        assert_eq!(ws.status(), WorkStatus::Working);
    }
}
